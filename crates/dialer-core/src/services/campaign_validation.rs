//! Campaign validation pass.
//!
//! Runs every check against the submitted fields and the caller's account,
//! returning all problems at once. The input is never modified; turning it
//! into a stored record is the job of the normalization functions in
//! `domain::campaign`.

use std::sync::Arc;

use crate::domain::{CampaignInput, DialerLimit, PacingField, User};
use crate::ports::{
    CampaignRepository, CoreError, GatewayRepository, Repos, RepositoryError, UserRepository,
    VoipAppRepository,
};
use crate::validation::{FieldError, FieldErrorKind, ValidationErrors};

pub(crate) const NOT_CONFIGURED_MESSAGE: &str =
    "Your settings are not configured properly, Please contact the administrator.";
pub(crate) const UNKNOWN_USER_MESSAGE: &str = "The User doesn't exist!";

/// Whether a request creates a record or modifies an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

pub struct CampaignValidator {
    users: Arc<dyn UserRepository>,
    campaigns: Arc<dyn CampaignRepository>,
    gateways: Arc<dyn GatewayRepository>,
    voip_apps: Arc<dyn VoipAppRepository>,
}

/// `Ok(true)` when the lookup found a record, `Ok(false)` on not-found.
fn exists<T>(result: Result<T, RepositoryError>) -> Result<bool, CoreError> {
    match result {
        Ok(_) => Ok(true),
        Err(RepositoryError::NotFound(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Record `chk_user` when the caller no longer resolves to a stored account.
pub(crate) async fn check_caller(
    users: &dyn UserRepository,
    caller: &User,
    errors: &mut ValidationErrors,
) -> Result<(), CoreError> {
    if !exists(users.get_by_id(caller.id).await)? {
        errors.add(
            "chk_user",
            FieldError::new(FieldErrorKind::NotFound, UNKNOWN_USER_MESSAGE),
        );
    }
    Ok(())
}

impl CampaignValidator {
    pub fn new(repos: &Repos) -> Self {
        Self {
            users: repos.users.clone(),
            campaigns: repos.campaigns.clone(),
            gateways: repos.gateways.clone(),
            voip_apps: repos.voip_apps.clone(),
        }
    }

    /// Collect every problem with `input` for a request made by `caller`.
    ///
    /// An empty result means the input may be normalized and stored.
    /// Storage failures abort validation with an error.
    pub async fn validate(
        &self,
        caller: &User,
        input: &CampaignInput,
        mode: ValidationMode,
    ) -> Result<ValidationErrors, CoreError> {
        let (parsed, mut errors) = input.parse();

        if mode == ValidationMode::Create && parsed.name.as_deref().is_none_or(str::is_empty) {
            errors.add("name", FieldError::missing());
        }

        match self.users.dialer_settings(caller.id).await? {
            None => errors.add(
                "user_dialer_setting",
                FieldError::new(FieldErrorKind::NotConfigured, NOT_CONFIGURED_MESSAGE),
            ),
            Some(settings) => {
                let owned = self.campaigns.count_for_user(caller.id).await?;
                if !settings.allows_another_campaign(owned) {
                    let limit = DialerLimit::CampaignCount;
                    errors.add(
                        limit.error_key(),
                        FieldError::new(
                            FieldErrorKind::LimitExceeded,
                            limit.message(settings.limit(limit)),
                        ),
                    );
                }
                for field in PacingField::ALL {
                    let (Some(limit), Some(value)) = (field.limit(), parsed.pacing_value(field))
                    else {
                        continue;
                    };
                    if settings.exceeds(limit, value) {
                        errors.add(
                            limit.error_key(),
                            FieldError::new(
                                FieldErrorKind::LimitExceeded,
                                limit.message(settings.limit(limit)),
                            ),
                        );
                    }
                }
            }
        }

        if let Some(id) = parsed.aleg_gateway {
            if !exists(self.gateways.get_by_id(id).await)? {
                errors.add(
                    "chk_gateway",
                    FieldError::new(FieldErrorKind::NotFound, "The Gateway ID doesn't exist!"),
                );
            }
        }
        if let Some(id) = parsed.voipapp {
            if !exists(self.voip_apps.get_by_id(id).await)? {
                errors.add(
                    "chk_voipapp",
                    FieldError::new(FieldErrorKind::NotFound, "The VoipApp doesn't exist!"),
                );
            }
        }

        check_caller(self.users.as_ref(), caller, &mut errors).await?;

        if mode == ValidationMode::Create {
            if let Some(name) = parsed.name.as_deref().filter(|n| !n.is_empty()) {
                if self.campaigns.name_exists(caller.id, name).await? {
                    errors.add(
                        "chk_campaign_name",
                        FieldError::new(FieldErrorKind::Duplicate, "The Campaign name duplicated!"),
                    );
                }
            }
        }

        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DialerSettings, normalize_new_campaign};
    use crate::services::testing::FakeStore;
    use crate::utils::timestamp;

    fn settings() -> DialerSettings {
        DialerSettings {
            max_number_campaign: 2,
            max_frequency: 20,
            callmaxduration: 100,
            maxretry: 3,
            max_calltimeout: 45,
        }
    }

    fn input(json: &str) -> CampaignInput {
        serde_json::from_str(json).unwrap()
    }

    async fn seed_campaign(store: &FakeStore, owner: &User, name: &str) {
        let new = normalize_new_campaign(
            &input(&format!(r#"{{"name": "{name}"}}"#)),
            owner.id,
            timestamp::now(),
            crate::domain::generate_campaign_code(),
        )
        .unwrap();
        CampaignRepository::insert(store, &new).await.unwrap();
    }

    #[tokio::test]
    async fn test_accepts_reference_example() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, Some(settings()));
        store.add_gateway("gw");
        store.add_voip_app("app");
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(
                &user,
                &input(
                    r#"{"name": "mylittlecampaign", "frequency": "20", "callmaxduration": "50",
                        "maxretry": "3", "intervalretry": "3000", "calltimeout": "45",
                        "aleg_gateway": "2", "voipapp": "3"}"#,
                ),
                ValidationMode::Create,
            )
            .await
            .unwrap();
        assert!(errors.is_empty(), "{errors}");
    }

    #[tokio::test]
    async fn test_missing_settings_reported() {
        let store = FakeStore::new();
        let user = store.add_user("bob", false, None);
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(&user, &input(r#"{"name": "c"}"#), ValidationMode::Create)
            .await
            .unwrap();
        let reported = errors.get("user_dialer_setting").unwrap();
        assert_eq!(reported[0].kind, FieldErrorKind::NotConfigured);
    }

    #[tokio::test]
    async fn test_each_pacing_limit_has_its_own_key() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, Some(settings()));
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(
                &user,
                &input(
                    r#"{"name": "c", "frequency": 21, "callmaxduration": 101,
                        "maxretry": 4, "calltimeout": 46, "intervalretry": 99999}"#,
                ),
                ValidationMode::Create,
            )
            .await
            .unwrap();

        for key in ["chk_frequency", "chk_duration", "chk_maxretry", "chk_timeout"] {
            let reported = errors.get(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(reported[0].kind, FieldErrorKind::LimitExceeded);
        }
        assert_eq!(
            errors.get("chk_frequency").unwrap()[0].message,
            "Maximum Frequency limit of 20 exceeded."
        );
        assert_eq!(errors.len(), 4);
    }

    #[tokio::test]
    async fn test_campaign_quota_and_duplicate_name() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, Some(settings()));
        seed_campaign(&store, &user, "first").await;
        seed_campaign(&store, &user, "second").await;
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(&user, &input(r#"{"name": "first"}"#), ValidationMode::Create)
            .await
            .unwrap();
        assert_eq!(
            errors.get("chk_campaign").unwrap()[0].message,
            "You have too many campaigns. Max allowed 2"
        );
        assert_eq!(
            errors.get("chk_campaign_name").unwrap()[0].kind,
            FieldErrorKind::Duplicate
        );
    }

    #[tokio::test]
    async fn test_same_name_for_other_user_is_fine() {
        let store = FakeStore::new();
        let alice = store.add_user("alice", false, Some(settings()));
        let bob = store.add_user("bob", false, Some(settings()));
        seed_campaign(&store, &alice, "shared").await;
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(&bob, &input(r#"{"name": "shared"}"#), ValidationMode::Create)
            .await
            .unwrap();
        assert!(errors.is_empty(), "{errors}");
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, Some(settings()));
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(
                &user,
                &input(r#"{"name": "c", "aleg_gateway": 404, "voipapp": "/api/v1/voipapp/405/"}"#),
                ValidationMode::Create,
            )
            .await
            .unwrap();
        assert_eq!(
            errors.get("chk_gateway").unwrap()[0].message,
            "The Gateway ID doesn't exist!"
        );
        assert_eq!(
            errors.get("chk_voipapp").unwrap()[0].message,
            "The VoipApp doesn't exist!"
        );
    }

    #[tokio::test]
    async fn test_unknown_caller() {
        let store = FakeStore::new();
        let ghost = User {
            id: 999,
            username: "ghost".into(),
            first_name: String::new(),
            last_name: String::new(),
            last_login: None,
            is_superuser: false,
            date_joined: timestamp::now(),
        };
        let validator = CampaignValidator::new(&store.repos());

        let errors = validator
            .validate(&ghost, &input(r#"{"name": "c"}"#), ValidationMode::Create)
            .await
            .unwrap();
        assert!(errors.contains_key("chk_user"));
        assert!(errors.contains_key("user_dialer_setting"));
    }

    #[tokio::test]
    async fn test_update_checks_quota_but_not_name() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, Some(settings()));
        seed_campaign(&store, &user, "first").await;
        seed_campaign(&store, &user, "second").await;
        let validator = CampaignValidator::new(&store.repos());

        let update = input(r#"{"name": "first", "frequency": 5}"#);
        let errors = validator
            .validate(&user, &update, ValidationMode::Update)
            .await
            .unwrap();
        let reported = errors.get("chk_campaign").unwrap();
        assert_eq!(reported[0].kind, FieldErrorKind::LimitExceeded);
        assert!(!errors.contains_key("chk_campaign_name"));
        assert_eq!(errors.len(), 1, "{errors}");
    }

    #[tokio::test]
    async fn test_update_below_quota_passes() {
        let store = FakeStore::new();
        let user = store.add_user("alice", false, Some(settings()));
        seed_campaign(&store, &user, "first").await;
        let validator = CampaignValidator::new(&store.repos());

        let update = input(r#"{"name": "first", "frequency": 5}"#);
        let errors = validator
            .validate(&user, &update, ValidationMode::Update)
            .await
            .unwrap();
        assert!(errors.is_empty(), "{errors}");
    }
}
