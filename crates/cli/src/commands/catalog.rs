//! Catalog inspection commands.
//!
//! Prints the seeded catalog as JSON, useful for checking slot IDs and
//! prices without starting the server.

use fitpass_server::catalog::Catalog;

/// Print all gyms as pretty JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn gyms() -> Result<(), serde_json::Error> {
    let catalog = Catalog::seed();

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(catalog.gyms())?);
    }
    Ok(())
}

/// Print all products as pretty JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn products() -> Result<(), serde_json::Error> {
    let catalog = Catalog::seed();

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(catalog.products())?);
    }
    Ok(())
}
