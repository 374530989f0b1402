//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use scoutline_app::{
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRecord, AccountUuid},
        },
        profiles::{
            MockProfilesService,
            records::{ProfileRecord, ProfileUuid},
        },
        rate_limits::{InMemoryRateLimitStore, RateLimitPolicy, RateLimiter},
        sessions::MockSessionsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACCOUNT_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_BEARER_TOKEN: &str = "sl_v1_test";

/// Stand-in for the auth middleware: every request is signed in as
/// [`TEST_ACCOUNT_UUID`].
#[salvo::handler]
pub(crate) async fn inject_account(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_account_uuid(TEST_ACCOUNT_UUID);
    depot.insert_bearer_token(TEST_BEARER_TOKEN.to_string());

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_account(email: &str) -> AccountRecord {
    AccountRecord {
        uuid: TEST_ACCOUNT_UUID,
        email: email.to_string(),
        has_password: true,
        email_verified_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_profile(display_name: &str, slug: &str) -> ProfileRecord {
    ProfileRecord {
        uuid: ProfileUuid::from_uuid(Uuid::nil()),
        account_uuid: TEST_ACCOUNT_UUID,
        display_name: display_name.to_string(),
        slug: slug.to_string(),
        headline: None,
        organization: None,
        bio: None,
        photo_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_register().never();
    accounts.expect_resend_verification().never();
    accounts.expect_verify_email().never();
    accounts.expect_request_password_reset().never();
    accounts.expect_reset_password().never();
    accounts.expect_set_password().never();
    accounts.expect_authenticate().never();

    accounts
}

fn strict_sessions_mock() -> MockSessionsService {
    let mut sessions = MockSessionsService::new();

    sessions.expect_issue().never();
    sessions.expect_authenticate_bearer().never();
    sessions.expect_revoke().never();

    sessions
}

fn strict_profiles_mock() -> MockProfilesService {
    let mut profiles = MockProfilesService::new();

    profiles.expect_save_profile().never();
    profiles.expect_get_profile().never();
    profiles.expect_get_by_slug().never();
    profiles.expect_set_photo().never();

    profiles
}

fn build_state(
    accounts: MockAccountsService,
    sessions: MockSessionsService,
    profiles: MockProfilesService,
    rate_limit: RateLimitPolicy,
) -> Arc<State> {
    State::from_app_context(AppContext {
        accounts: Arc::new(accounts),
        sessions: Arc::new(sessions),
        profiles: Arc::new(profiles),
        rate_limiter: Arc::new(RateLimiter::new(
            Arc::new(InMemoryRateLimitStore::new()),
            rate_limit,
        )),
    })
}

fn unlimited() -> RateLimitPolicy {
    RateLimitPolicy {
        max: u32::MAX,
        window: Duration::from_secs(60),
    }
}

pub(crate) fn state_with_sessions(sessions: MockSessionsService) -> Arc<State> {
    build_state(
        strict_accounts_mock(),
        sessions,
        strict_profiles_mock(),
        unlimited(),
    )
}

pub(crate) fn state_with_rate_limit(policy: RateLimitPolicy) -> Arc<State> {
    build_state(
        strict_accounts_mock(),
        strict_sessions_mock(),
        strict_profiles_mock(),
        policy,
    )
}

pub(crate) fn accounts_service(accounts: MockAccountsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(build_state(
                accounts,
                strict_sessions_mock(),
                strict_profiles_mock(),
                unlimited(),
            )))
            .push(route),
    )
}

pub(crate) fn sessions_service(
    accounts: MockAccountsService,
    sessions: MockSessionsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(build_state(
                accounts,
                sessions,
                strict_profiles_mock(),
                unlimited(),
            )))
            .hoop(inject_account)
            .push(route),
    )
}

pub(crate) fn profiles_service(profiles: MockProfilesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(build_state(
                strict_accounts_mock(),
                strict_sessions_mock(),
                profiles,
                unlimited(),
            )))
            .hoop(inject_account)
            .push(route),
    )
}
