use dealgate_gateway::domain::ports::OtpStore;
use dealgate_gateway::error::GatewayError;
use dealgate_gateway::infra::directory::fallback_id;
use dealgate_gateway::infra::memory::MemoryOtpStore;
use dealgate_gateway::usecase::verify_code::{VerifyCodeInput, VerifyCodeUseCase};

use crate::helpers::MockDirectory;

fn usecase(
    store: &MemoryOtpStore,
    directory: MockDirectory,
    bypass: bool,
) -> VerifyCodeUseCase<MemoryOtpStore, MockDirectory> {
    VerifyCodeUseCase {
        otp: store.clone(),
        directory,
        bypass_otp: bypass,
    }
}

fn wrong_code(code: &str) -> String {
    if code == "000000" { "000001" } else { "000000" }.to_owned()
}

#[tokio::test]
async fn correct_code_yields_a_session_for_the_resolved_user() {
    let store = MemoryOtpStore::new();
    let code = store.issue("a@b.com").await;

    let out = usecase(&store, MockDirectory::answering("dir-1"), false)
        .execute(VerifyCodeInput {
            email: "a@b.com".to_owned(),
            code,
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, "dir-1");
    assert_eq!(out.user.email, "a@b.com");
    assert_eq!(out.session.email, "a@b.com");
    assert_eq!(out.session.user_id, "dir-1");
    assert!(out.session.created_at > 0);
    // The otp/session boundary: verification consumed the code.
    assert_eq!(store.pending_count(), 0);
}

#[tokio::test]
async fn mismatched_code_fails_and_a_correct_retry_succeeds() {
    let store = MemoryOtpStore::new();
    let code = store.issue("a@b.com").await;
    let uc = usecase(&store, MockDirectory::answering("dir-1"), false);

    let result = uc
        .execute(VerifyCodeInput {
            email: "a@b.com".to_owned(),
            code: wrong_code(&code),
        })
        .await;
    assert!(matches!(result, Err(GatewayError::OtpMismatch)));
    assert_eq!(store.pending_count(), 1, "mismatch keeps the entry");

    uc.execute(VerifyCodeInput {
        email: "a@b.com".to_owned(),
        code,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn a_consumed_code_cannot_be_replayed() {
    let store = MemoryOtpStore::new();
    let code = store.issue("a@b.com").await;
    let uc = usecase(&store, MockDirectory::answering("dir-1"), false);

    uc.execute(VerifyCodeInput {
        email: "a@b.com".to_owned(),
        code: code.clone(),
    })
    .await
    .unwrap();

    let result = uc
        .execute(VerifyCodeInput {
            email: "a@b.com".to_owned(),
            code,
        })
        .await;
    assert!(matches!(result, Err(GatewayError::OtpNotFound)));
}

#[tokio::test]
async fn malformed_code_shape_is_rejected_before_the_store() {
    let store = MemoryOtpStore::new();
    store.issue("a@b.com").await;
    let uc = usecase(&store, MockDirectory::answering("dir-1"), false);

    for code in ["", "123", "1234567", "12345a"] {
        let result = uc
            .execute(VerifyCodeInput {
                email: "a@b.com".to_owned(),
                code: code.to_owned(),
            })
            .await;
        assert!(
            matches!(result, Err(GatewayError::InvalidCode)),
            "code {code:?} should be rejected"
        );
    }
    assert_eq!(store.pending_count(), 1, "shape failures never consume");
}

#[tokio::test]
async fn directory_outage_degrades_to_the_fallback_identity() {
    let store = MemoryOtpStore::new();
    let code = store.issue("a@b.com").await;

    let out = usecase(&store, MockDirectory::unreachable(), false)
        .execute(VerifyCodeInput {
            email: "a@b.com".to_owned(),
            code,
        })
        .await
        .unwrap();

    // Login survives the outage with the deterministic hash id.
    assert_eq!(out.user.id, fallback_id("a@b.com"));
    assert_eq!(out.session.user_id, fallback_id("a@b.com"));
}

#[tokio::test]
async fn bypass_mode_ignores_the_code_entirely() {
    let store = MemoryOtpStore::new();

    let out = usecase(&store, MockDirectory::answering("dir-1"), true)
        .execute(VerifyCodeInput {
            email: "a@b.com".to_owned(),
            code: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, "dir-1");
    assert_eq!(out.session.email, "a@b.com");
}
