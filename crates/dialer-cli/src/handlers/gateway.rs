//! Gateway handlers.

use dialer_core::{Gateway, NewGateway};

use super::whole_table;
use crate::bootstrap::CliContext;
use crate::commands::GatewayArgs;
use crate::error::CliError;
use crate::presentation::print_gateway_table;

pub async fn add(ctx: &CliContext, args: GatewayArgs) -> Result<Gateway, CliError> {
    let mut new = NewGateway::new(args.name, args.gateways);
    if let Some(description) = args.description {
        new.description = description;
    }
    if let Some(codecs) = args.codecs {
        new.gateway_codecs = codecs;
    }
    if let Some(timeouts) = args.timeouts {
        new.gateway_timeouts = timeouts;
    }
    if let Some(retries) = args.retries {
        new.gateway_retries = retries;
    }
    new.maximum_call = args.max_calls;

    let gateway = ctx.app().gateways().add(&new).await?;
    println!("Gateway '{}' registered with ID {}.", gateway.name, gateway.id);
    Ok(gateway)
}

pub async fn list(ctx: &CliContext) -> Result<(), CliError> {
    let page = ctx.app().gateways().list(whole_table()).await?;
    if page.items.is_empty() {
        println!("No gateways registered. Add one with 'dialer gateway add'.");
        return Ok(());
    }
    print_gateway_table(&page.items);
    Ok(())
}
