#[tokio::main]
async fn main() {
    attendance_backend::run().await;
}
