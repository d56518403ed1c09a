// tests/config_load.rs
use daily_senryu::config::{SenryuConfig, SourceKind, ENV_CONFIG_PATH, ENV_SOURCE};
use std::path::PathBuf;
use std::{env, fs};

#[test]
fn explicit_path_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("senryu.toml");
    fs::write(
        &p,
        r#"
source = "newsapi"

[gemini]
model = "gemini-1.5-flash"
"#,
    )
    .unwrap();

    let cfg = SenryuConfig::load_from(&p).unwrap();
    assert_eq!(cfg.source, SourceKind::NewsApi);
    assert_eq!(cfg.gemini.model, "gemini-1.5-flash");
    assert_eq!(
        cfg.gemini.base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("senryu.toml");
    fs::write(&p, "source = [").unwrap();
    assert!(SenryuConfig::load_from(&p).is_err());
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // run from an empty temp dir so the repo's config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_SOURCE);

    // 1) nothing on disk -> defaults
    let d = SenryuConfig::load_default().unwrap();
    assert_eq!(d.source, SourceKind::Rss);
    assert_eq!(d.output.path, PathBuf::from("data/senryu_today.json"));

    // 2) ./config/senryu.toml fallback
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/senryu.toml"),
        "[output]\npath = \"public/data/today.json\"\n",
    )
    .unwrap();
    let f = SenryuConfig::load_default().unwrap();
    assert_eq!(f.output.path, PathBuf::from("public/data/today.json"));

    // 3) env path wins, SENRYU_SOURCE overrides the file
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "source = \"rss\"\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    env::set_var(ENV_SOURCE, "newsapi");
    let e = SenryuConfig::load_default().unwrap();
    assert_eq!(e.source, SourceKind::NewsApi);
    assert_eq!(e.output.path, PathBuf::from("data/senryu_today.json"));

    // 4) env path to a missing file is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
    assert!(SenryuConfig::load_default().is_err());

    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_SOURCE);
    env::set_current_dir(&old).unwrap();
}
