use harbonline_backend::config::JwtConfig;
use harbonline_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

struct TestUser {
    id: String,
    email: String,
    role: String,
}

impl TestUser {
    fn new_admin() -> Self {
        Self {
            id: "6650f0c2a1b2c3d4e5f60718".to_string(),
            email: "admin@harbonline.test".to_string(),
            role: ADMIN_ROLE.to_string(),
        }
    }

    fn new_editor() -> Self {
        Self {
            id: "6650f0c2a1b2c3d4e5f60719".to_string(),
            email: "editor@harbonline.test".to_string(),
            role: "editor".to_string(),
        }
    }
}

#[test]
fn test_token_type_as_str() {
    assert_eq!(TokenType::Access.as_str(), "access");
    assert_eq!(TokenType::Refresh.as_str(), "refresh");
}

#[test]
fn test_token_pair_round_trip() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();

    let pair = jwt_utils.generate_token_pair(&user.id, &user.email, &user.role).unwrap();
    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.expires_in, jwt_utils.jwt_config.access_token_expiration * 60);
    assert_ne!(pair.access_token, pair.refresh_token);

    let claims = jwt_utils.validate_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.token_type, "access");
    assert_eq!(claims.iss.as_deref(), Some("harbonline-backend"));
    assert!(claims.exp > claims.iat);

    let refresh = jwt_utils.validate_refresh_token(&pair.refresh_token).unwrap();
    assert_eq!(refresh.token_type, "refresh");
}

#[test]
fn test_token_types_are_not_interchangeable() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();
    let pair = jwt_utils.generate_token_pair(&user.id, &user.email, &user.role).unwrap();

    match jwt_utils.validate_access_token(&pair.refresh_token) {
        Err(JwtError::InvalidTokenType { expected, actual }) => {
            assert_eq!(expected, "access");
            assert_eq!(actual, "refresh");
        }
        other => panic!("expected InvalidTokenType, got {:?}", other),
    }
    assert!(jwt_utils.validate_refresh_token(&pair.access_token).is_err());
}

#[test]
fn test_expired_token_is_reported_as_expired() {
    let config = JwtConfig { access_token_expiration: -5, ..JwtConfig::default() };
    let jwt_utils = JwtTokenUtilsImpl::new(config);
    let user = TestUser::new_admin();

    let token = jwt_utils.generate_token(&user.id, &user.email, &user.role, TokenType::Access).unwrap();
    assert!(matches!(jwt_utils.validate_access_token(&token), Err(JwtError::TokenExpired)));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let user = TestUser::new_admin();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a-completely-different-secret-that-is-long-enough-to-pass".to_string(),
        ..JwtConfig::default()
    });
    let token = other.generate_token(&user.id, &user.email, &user.role, TokenType::Access).unwrap();

    let jwt_utils = create_test_jwt_utils();
    assert!(matches!(jwt_utils.validate_access_token(&token), Err(JwtError::DecodingFailed(_))));
}

#[test]
fn test_audience_mismatch_is_rejected() {
    let user = TestUser::new_admin();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_audience: Some("someone-else".to_string()),
        ..JwtConfig::default()
    });
    let token = other.generate_token(&user.id, &user.email, &user.role, TokenType::Access).unwrap();
    assert!(create_test_jwt_utils().validate_access_token(&token).is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = create_test_jwt_utils();
    assert_eq!(jwt_utils.extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    assert!(matches!(jwt_utils.extract_token_from_header("Basic abc"), Err(JwtError::InvalidToken)));
    assert!(matches!(jwt_utils.extract_token_from_header("Bearer "), Err(JwtError::InvalidToken)));
    assert!(jwt_utils.extract_token_from_header("").is_err());
}

#[test]
fn test_is_admin() {
    let jwt_utils = create_test_jwt_utils();
    for (user, expected) in [(TestUser::new_admin(), true), (TestUser::new_editor(), false)] {
        let token = jwt_utils.generate_token(&user.id, &user.email, &user.role, TokenType::Access).unwrap();
        let claims = jwt_utils.validate_access_token(&token).unwrap();
        assert_eq!(jwt_utils.is_admin(&claims), expected);
    }
}

#[test]
fn test_every_token_gets_a_unique_jti() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_editor();
    let a = jwt_utils.generate_token(&user.id, &user.email, &user.role, TokenType::Access).unwrap();
    let b = jwt_utils.generate_token(&user.id, &user.email, &user.role, TokenType::Access).unwrap();
    let a = jwt_utils.validate_access_token(&a).unwrap();
    let b = jwt_utils.validate_access_token(&b).unwrap();
    assert_ne!(a.jti, b.jti);
}
