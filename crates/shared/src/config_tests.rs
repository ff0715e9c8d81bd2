use super::*;
use rstest::rstest;

const COMPLETE_ENV: [(&str, Option<&str>); 4] = [
    (
        "IMOR__STORAGE__CONNECTION_STRING",
        Some("DefaultEndpointsProtocol=https;AccountName=imor;AccountKey=a2V5;EndpointSuffix=core.windows.net"),
    ),
    ("IMOR__VISION__ENDPOINT", Some("https://vision.example.com/vision/v2.0")),
    ("IMOR__VISION__SUBSCRIPTION_KEY", Some("secret")),
    ("IMOR__SPARQL__ENDPOINT", Some("https://sparql.example.com/api")),
];

const LEGACY_VARS: [(&str, Option<&str>); 4] = [
    ("imorblobstorage_STORAGE", None),
    ("SubscriptionKey", None),
    ("VisionEndpoint", None),
    ("SparqlEndpoint", None),
];

fn valid_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        storage: StorageSettings {
            connection_string: "UseDevelopmentStorage=true".to_string(),
        },
        vision: VisionConfig {
            endpoint: "https://vision.example.com".to_string(),
            subscription_key: "secret".to_string(),
        },
        sparql: SparqlConfig {
            endpoint: "https://sparql.example.com".to_string(),
        },
        http: HttpConfig::default(),
    }
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.http.timeout_secs, 30);
}

#[test]
fn test_valid_config_passes() {
    assert!(valid_config().ensure_valid().is_ok());
}

#[test]
fn test_empty_config_names_every_missing_field() {
    let err = AppConfig::default().ensure_valid().unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
    assert_eq!(
        err.to_string(),
        "Configuration error: missing or invalid configuration: \
         sparql.endpoint, storage.connection_string, vision.endpoint, vision.subscription_key"
    );
}

#[rstest]
#[case::blank_key(|c: &mut AppConfig| c.vision.subscription_key.clear(), "vision.subscription_key")]
#[case::bad_vision_url(|c: &mut AppConfig| c.vision.endpoint = "not a url".into(), "vision.endpoint")]
#[case::bad_sparql_url(|c: &mut AppConfig| c.sparql.endpoint.clear(), "sparql.endpoint")]
#[case::zero_timeout(|c: &mut AppConfig| c.http.timeout_secs = 0, "http.timeout_secs")]
fn test_single_invalid_field(#[case] mutate: fn(&mut AppConfig), #[case] field: &str) {
    let mut config = valid_config();
    mutate(&mut config);

    let message = config.ensure_valid().unwrap_err().to_string();
    assert!(message.ends_with(field), "unexpected message: {message}");
}

#[test]
fn test_load_from_environment() {
    let vars: Vec<_> = COMPLETE_ENV.into_iter().chain(LEGACY_VARS).collect();
    let config = temp_env::with_vars(vars, AppConfig::load).expect("config should load");

    assert_eq!(config.vision.subscription_key, "secret");
    assert_eq!(config.vision.endpoint, "https://vision.example.com/vision/v2.0");
    assert_eq!(config.sparql.endpoint, "https://sparql.example.com/api");
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_load_fails_fast_when_required_values_missing() {
    let vars: Vec<_> = COMPLETE_ENV
        .into_iter()
        .map(|(key, _)| (key, None))
        .chain(LEGACY_VARS)
        .collect();
    let err = temp_env::with_vars(vars, AppConfig::load).unwrap_err();

    assert!(matches!(err, AppError::Configuration(_)));
    assert!(err.to_string().contains("vision.subscription_key"));
}

#[test]
fn test_load_accepts_functions_app_settings() {
    let vars = [
        ("IMOR__STORAGE__CONNECTION_STRING", None),
        ("IMOR__VISION__ENDPOINT", None),
        ("IMOR__VISION__SUBSCRIPTION_KEY", None),
        ("IMOR__SPARQL__ENDPOINT", None),
        ("imorblobstorage_STORAGE", Some("UseDevelopmentStorage=true")),
        ("SubscriptionKey", Some("legacy-key")),
        ("VisionEndpoint", Some("https://legacy-vision.example.com")),
        ("SparqlEndpoint", Some("https://legacy-sparql.example.com")),
    ];
    let config = temp_env::with_vars(vars, AppConfig::load).expect("config should load");

    assert_eq!(config.storage.connection_string, "UseDevelopmentStorage=true");
    assert_eq!(config.vision.subscription_key, "legacy-key");
}

#[test]
fn test_prefixed_variable_wins_over_app_setting() {
    let vars: Vec<_> = COMPLETE_ENV
        .into_iter()
        .chain([("SubscriptionKey", Some("legacy-key"))])
        .collect();
    let config = temp_env::with_vars(vars, AppConfig::load).expect("config should load");

    assert_eq!(config.vision.subscription_key, "secret");
}
