//! Dial command handler: place a single test call.

use dialer_core::{CallRequest, CallResponse};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::commands::DialArgs;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, args: DialArgs) -> Result<CallResponse, CliError> {
    let response = match (args.campaign, args.user.as_deref()) {
        (Some(campaign_id), Some(username)) => {
            let caller = ctx.app().users().find_by_username(username).await?;
            ctx.app()
                .dispatch()
                .dial_for_campaign(&caller, campaign_id, &args.phone_number)
                .await?
        }
        (Some(_), None) => {
            return Err(CliError::Arguments(
                "--campaign needs --user to look the campaign up".to_string(),
            ));
        }
        (None, _) => {
            let gateway = args.gateway.as_deref().unwrap_or_default();
            let mut request = CallRequest::new(args.caller_id.clone(), args.phone_number.trim())
                .with_gateway_list(gateway);
            if let Some(limit) = args.time_limit {
                request = request.with_time_limit(limit);
            }
            info!(destination = %request.destination, gateway, "Placing test call");
            ctx.app().dispatch().place_call(&request).await?
        }
    };

    println!("Call requested: {}", response.request_uuid);
    if let Some(message) = &response.message {
        println!("{message}");
    }
    Ok(response)
}
