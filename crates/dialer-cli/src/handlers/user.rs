//! Account handlers: creation and dialer limits.

use dialer_core::{DialerSettings, User};

use crate::bootstrap::CliContext;
use crate::commands::LimitArgs;
use crate::error::CliError;
use crate::presentation::print_user_table;

/// Create an account. Non-superusers get the default dialer limits so
/// they can create campaigns straight away.
pub async fn add(
    ctx: &CliContext,
    username: &str,
    password: &str,
    superuser: bool,
) -> Result<User, CliError> {
    let user = ctx.app().users().create(username, password, superuser).await?;
    if !superuser {
        ctx.app()
            .users()
            .set_dialer_settings(user.id, &DialerSettings::default())
            .await?;
    }

    print_user_table(std::slice::from_ref(&user));
    Ok(user)
}

/// Overlay the supplied limits on the account's current ones.
pub async fn limits(ctx: &CliContext, args: &LimitArgs) -> Result<DialerSettings, CliError> {
    let user = ctx.app().users().find_by_username(&args.username).await?;
    let mut settings = ctx
        .app()
        .users()
        .dialer_settings(user.id)
        .await?
        .unwrap_or_default();

    if let Some(v) = args.max_campaigns {
        settings.max_number_campaign = v;
    }
    if let Some(v) = args.max_frequency {
        settings.max_frequency = v;
    }
    if let Some(v) = args.max_duration {
        settings.callmaxduration = v;
    }
    if let Some(v) = args.max_retry {
        settings.maxretry = v;
    }
    if let Some(v) = args.max_timeout {
        settings.max_calltimeout = v;
    }

    ctx.app()
        .users()
        .set_dialer_settings(user.id, &settings)
        .await?;

    println!("Dialer limits for '{}':", user.username);
    println!("  campaigns:    {}", settings.max_number_campaign);
    println!("  frequency:    {}", settings.max_frequency);
    println!("  duration:     {}s", settings.callmaxduration);
    println!("  retries:      {}", settings.maxretry);
    println!("  call timeout: {}s", settings.max_calltimeout);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::context;

    #[tokio::test]
    async fn test_add_gives_regular_users_default_limits() {
        let (ctx, _db) = context().await;

        let alice = add(&ctx, "alice", "secret", false).await.unwrap();
        let admin = add(&ctx, "admin", "secret", true).await.unwrap();

        let users = ctx.app().users();
        assert_eq!(
            users.dialer_settings(alice.id).await.unwrap(),
            Some(DialerSettings::default())
        );
        assert_eq!(users.dialer_settings(admin.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_limits_keep_unset_values() {
        let (ctx, _db) = context().await;
        add(&ctx, "alice", "secret", false).await.unwrap();

        let args = LimitArgs {
            username: "alice".to_string(),
            max_frequency: Some(20),
            max_retry: Some(5),
            ..LimitArgs::default()
        };
        let settings = limits(&ctx, &args).await.unwrap();

        assert_eq!(settings.max_frequency, 20);
        assert_eq!(settings.maxretry, 5);
        assert_eq!(settings.max_calltimeout, DialerSettings::default().max_calltimeout);
    }

    #[tokio::test]
    async fn test_limits_for_unknown_user() {
        let (ctx, _db) = context().await;
        let args = LimitArgs {
            username: "ghost".to_string(),
            ..LimitArgs::default()
        };

        let err = limits(&ctx, &args).await.unwrap_err();
        assert_eq!(err.exit_code(), 66);
    }
}
