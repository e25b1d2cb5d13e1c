/// Database layer for todohub
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded migration runner
///
/// Models live in the `models` module and the CRUD contracts in
/// `repository`, both at crate root level.

pub mod migrations;
pub mod pool;
