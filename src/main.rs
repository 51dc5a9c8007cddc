#[tokio::main]
async fn main() -> std::io::Result<()> {
    gravida_care_lib::run().await
}
