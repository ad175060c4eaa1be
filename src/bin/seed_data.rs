//! Seeds the baseline catalog rows every installation needs.
//!
//! Run with: cargo run --bin seed-data -- --database-url sqlite://pedidos.db?mode=rwc
//!
//! Ensures the payment methods CONTADO, TARJETA and TRANSFERENCIA and the central
//! warehouse ALM-CENTRAL exist. Rows are matched by `codigo`, so running it again
//! leaves existing data untouched.

use clap::Parser;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use pedidos_api::{
    db,
    entities::{almacen, forma_pago},
};

const FORMAS_PAGO: &[(&str, &str)] = &[
    ("CONTADO", "Contado"),
    ("TARJETA", "Tarjeta"),
    ("TRANSFERENCIA", "Transferencia bancaria"),
];

const ALMACEN_CENTRAL: (&str, &str) = ("ALM-CENTRAL", "Almacén central");

#[derive(Debug, Parser)]
#[command(name = "seed-data", about = "Seed baseline pedidos data")]
struct Args {
    /// Database to seed; falls back to the application configuration
    #[arg(long, env = "APP__DATABASE_URL")]
    database_url: Option<String>,

    /// Do not run migrations before seeding
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let database_url = match args.database_url {
        Some(url) => url,
        None => pedidos_api::config::load_config()?.database_url,
    };

    info!("Connecting to database: {}", database_url);
    let pool = db::establish_connection(&database_url).await?;
    if !args.skip_migrations {
        db::run_migrations(&pool).await?;
    }

    let mut created = 0;
    for (codigo, nombre) in FORMAS_PAGO {
        if ensure_forma_pago(&pool, codigo, nombre).await? {
            created += 1;
        }
    }
    if ensure_almacen(&pool, ALMACEN_CENTRAL.0, ALMACEN_CENTRAL.1).await? {
        created += 1;
    }

    info!("Seed complete: {} rows created", created);
    db::close_pool(pool).await?;
    Ok(())
}

async fn ensure_forma_pago(
    pool: &DatabaseConnection,
    codigo: &str,
    nombre: &str,
) -> anyhow::Result<bool> {
    let existing = forma_pago::Entity::find()
        .filter(forma_pago::Column::Codigo.eq(codigo))
        .one(pool)
        .await?;
    if existing.is_some() {
        info!("  forma de pago {} already present", codigo);
        return Ok(false);
    }

    forma_pago::ActiveModel {
        codigo: Set(codigo.to_string()),
        nombre: Set(nombre.to_string()),
        ..Default::default()
    }
    .insert(pool)
    .await?;
    info!("  created forma de pago {}", codigo);
    Ok(true)
}

async fn ensure_almacen(
    pool: &DatabaseConnection,
    codigo: &str,
    nombre: &str,
) -> anyhow::Result<bool> {
    let existing = almacen::Entity::find()
        .filter(almacen::Column::Codigo.eq(codigo))
        .one(pool)
        .await?;
    if existing.is_some() {
        info!("  almacen {} already present", codigo);
        return Ok(false);
    }

    almacen::ActiveModel {
        codigo: Set(codigo.to_string()),
        nombre: Set(nombre.to_string()),
        ..Default::default()
    }
    .insert(pool)
    .await?;
    info!("  created almacen {}", codigo);
    Ok(true)
}
