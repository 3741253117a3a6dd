// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/openapi.json

use rsvp_api::openapi::ApiDoc;

fn main() -> anyhow::Result<()> {
    println!("{}", ApiDoc::to_json()?);
    Ok(())
}
