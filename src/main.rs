#[actix_web::main]
async fn main() -> std::io::Result<()> {
    contract_farming_server::run().await
}
