//! Dispatch service - hands single calls to the telephony port.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{Scope, User};
use crate::ports::{
    CallRequest, CallResponse, CampaignRepository, CoreError, GatewayRepository, Repos,
    RepositoryError, TelephonyPort,
};

pub struct DispatchService {
    telephony: Arc<dyn TelephonyPort>,
    campaigns: Arc<dyn CampaignRepository>,
    gateways: Arc<dyn GatewayRepository>,
}

impl DispatchService {
    pub fn new(repos: &Repos, telephony: Arc<dyn TelephonyPort>) -> Self {
        Self {
            telephony,
            campaigns: repos.campaigns.clone(),
            gateways: repos.gateways.clone(),
        }
    }

    /// Place one call. Failures are logged and returned unchanged.
    pub async fn place_call(&self, request: &CallRequest) -> Result<CallResponse, CoreError> {
        if let Err(e) = request.validate() {
            error!(destination = %request.destination, error = %e, "Refusing to place call");
            return Err(e.into());
        }
        match self.telephony.place_call(request).await {
            Ok(response) => {
                info!(
                    request_uuid = %response.request_uuid,
                    destination = %request.destination,
                    "Call placed"
                );
                Ok(response)
            }
            Err(e) => {
                error!(destination = %request.destination, error = %e, "Call placement failed");
                Err(e.into())
            }
        }
    }

    /// Call `phone_number` using a campaign's caller ID, A-leg gateway and
    /// maximum duration.
    pub async fn dial_for_campaign(
        &self,
        caller: &User,
        campaign_id: i64,
        phone_number: &str,
    ) -> Result<CallResponse, CoreError> {
        let campaign = match self.campaigns.get_by_id(campaign_id).await {
            Ok(c) if Scope::for_user(caller).permits(c.user_id) => c,
            Ok(_) | Err(RepositoryError::NotFound(_)) => {
                return Err(CoreError::NotFound(format!("campaign {campaign_id}")));
            }
            Err(e) => return Err(e.into()),
        };
        let gateway_id = campaign.aleg_gateway_id.ok_or_else(|| {
            CoreError::Validation(format!("campaign {campaign_id} has no A-leg gateway"))
        })?;
        let gateway = match self.gateways.get_by_id(gateway_id).await {
            Ok(g) => g,
            Err(RepositoryError::NotFound(_)) => {
                return Err(CoreError::Validation(format!(
                    "gateway {gateway_id} of campaign {campaign_id} no longer exists"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let request = CallRequest::new(campaign.callerid.clone(), phone_number.trim())
            .with_gateway_list(&gateway.gateways)
            .with_codecs(gateway.gateway_codecs.clone())
            .with_timeouts(gateway.gateway_timeouts.clone())
            .with_retries(gateway.gateway_retries.clone())
            .with_time_limit(campaign.pacing.callmaxduration);

        info!(
            campaign_id,
            code = %campaign.campaign_code,
            gateway = %gateway.name,
            "Dialing for campaign"
        );
        self.place_call(&request).await
    }
}
