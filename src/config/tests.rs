use super::*;

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.site.title, "RentApp");
    assert!(settings.auth.session_url.is_none());
    assert!(!settings.auth.trust_proxy_headers);
    assert!(settings.rpc.base_url.is_none());
    assert_eq!(settings.rpc.timeout, Duration::from_millis(5_000));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let err = Settings::from_raw(raw).expect_err("port 0 must fail");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn invalid_log_level_names_the_key() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid level must fail");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn blank_collaborator_urls_mean_disabled() {
    let mut raw = RawSettings::default();
    raw.auth.session_url = Some("   ".to_string());
    raw.rpc.base_url = Some(String::new());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.auth.session_url.is_none());
    assert!(settings.rpc.base_url.is_none());
}

#[test]
fn collaborator_urls_must_be_http() {
    let mut raw = RawSettings::default();
    raw.rpc.base_url = Some("ftp://rpc.internal".to_string());

    let err = Settings::from_raw(raw).expect_err("ftp scheme must fail");
    assert!(matches!(err, LoadError::Invalid { key: "rpc.base_url", .. }));
}

#[test]
fn zero_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.auth.timeout_ms = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero timeout must fail");
    assert!(matches!(err, LoadError::Invalid { key: "auth.timeout_ms", .. }));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["rentapp"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "rentapp",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--rpc-base-url",
        "http://localhost:3000",
        "--log-json",
        "true",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(
                serve.overrides.rpc_base_url.as_deref(),
                Some("http://localhost:3000")
            );
            assert_eq!(serve.overrides.log_json, Some(true));
        }
    }
}

#[test]
fn proxy_header_trust_is_opt_in_from_cli() {
    let args = CliArgs::parse_from(["rentapp", "serve", "--auth-trust-proxy-headers", "yes"]);

    let mut raw = RawSettings::default();
    match args.command.expect("serve command") {
        Command::Serve(serve) => raw.apply_serve_overrides(&serve.overrides),
    }
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(settings.auth.trust_proxy_headers);
}
