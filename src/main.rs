#[tokio::main]
async fn main() -> anyhow::Result<()> {
    doctor_directory_lib::run().await
}
