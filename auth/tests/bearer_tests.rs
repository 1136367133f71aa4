use chirpy_auth::extract_bearer_token;
use chirpy_auth::BearerError;

#[test]
fn test_get_bearer_token() {
    let tests = [
        ("valid bearer token", "Bearer valid-token-123", Ok("valid-token-123")),
        ("valid with extra space", " Bearer   abc123   ", Ok("abc123")),
        ("missing header", "", Err(BearerError::MissingHeader)),
        ("whitespace only", "   ", Err(BearerError::MalformedScheme)),
        ("wrong prefix", "Basic abc123", Err(BearerError::MalformedScheme)),
        ("empty token", "Bearer ", Err(BearerError::EmptyToken)),
    ];

    for (name, header, want) in tests {
        assert_eq!(extract_bearer_token(header), want, "{name}");
    }
}
