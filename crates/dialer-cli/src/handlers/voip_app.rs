//! VoIP application handlers.

use dialer_core::{NewVoipApp, VoipApp, VoipAppType};

use super::whole_table;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_voip_app_table;

pub async fn add(
    ctx: &CliContext,
    name: String,
    app_type: VoipAppType,
    data: String,
    description: Option<String>,
) -> Result<VoipApp, CliError> {
    let mut new = NewVoipApp::new(name, app_type, data);
    if let Some(description) = description {
        new.description = description;
    }

    let app = ctx.app().voip_apps().add(&new).await?;
    println!("VoIP application '{}' registered with ID {}.", app.name, app.id);
    Ok(app)
}

pub async fn list(ctx: &CliContext) -> Result<(), CliError> {
    let page = ctx.app().voip_apps().list(whole_table()).await?;
    if page.items.is_empty() {
        println!("No VoIP applications registered.");
        return Ok(());
    }
    print_voip_app_table(&page.items);
    Ok(())
}
