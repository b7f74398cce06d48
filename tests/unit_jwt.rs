use authgate::authgate_auth::{JwtKeys, TokenRejection};
use authgate::authgate_config::JwtConfig;

const NOW: i64 = 1_750_000_000;

fn keys(secret: &str, expiry: i64) -> JwtKeys {
    JwtKeys::new(&JwtConfig {
        secret: secret.to_string(),
        access_token_expiry: expiry,
        issuer: "authgate".to_string(),
    })
    .unwrap()
}

#[test]
fn test_token_lifetime_window() {
    let keys = keys("window-secret", 3600);
    let token = keys.issue_at(42, NOW).unwrap();

    let claims = keys.verify_at(&token, NOW).unwrap();
    assert_eq!(claims.user_id(), Some(42));
    assert_eq!(claims.exp - claims.iat, 3600);

    assert!(keys.verify_at(&token, NOW + 3600).is_ok());
    assert_eq!(
        keys.verify_at(&token, NOW + 3601).unwrap_err(),
        TokenRejection::Expired
    );
}

#[test]
fn test_token_bound_to_secret() {
    let token = keys("secret-one", 3600).issue_at(1, NOW).unwrap();

    assert_eq!(
        keys("secret-two", 3600).verify_at(&token, NOW).unwrap_err(),
        TokenRejection::InvalidToken
    );
}

#[test]
fn test_each_user_gets_their_own_subject() {
    let keys = keys("subject-secret", 60);

    for user_id in [1, 2, 1_000_000] {
        let token = keys.issue_at(user_id, NOW).unwrap();
        assert_eq!(keys.verify_at(&token, NOW).unwrap().sub, user_id.to_string());
    }
}
