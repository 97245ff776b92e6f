use sea_orm_migration::prelude::*;

use leakwatch_inspections_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
