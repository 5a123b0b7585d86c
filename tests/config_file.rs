use dungeondoor::config::Config;
use dungeondoor::game::Dungeon;

#[tokio::test]
async fn default_config_round_trips_through_file() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("config.toml");
    let path = path.to_string_lossy().to_string();
    Config::create_default(&path).await.unwrap();

    let cfg = Config::load(&path).await.unwrap();
    assert_eq!(cfg.game.start.hp, 100);
    assert_eq!(cfg.game.start.attack, 15);
    assert_eq!(cfg.game.encounters.monster, 50);
    assert!(Dungeon::new(cfg.game).is_ok());
}

#[tokio::test]
async fn invalid_values_fail_to_load() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("bad.toml");
    std::fs::write(&path, "[game]\nflee_chance = 2.0\n").unwrap();
    let err = Config::load(&path.to_string_lossy()).await.unwrap_err();
    assert!(err.to_string().contains("flee_chance"));
}

#[tokio::test]
async fn missing_file_reports_path() {
    let err = Config::load("/nonexistent/dungeondoor.toml").await.unwrap_err();
    assert!(err.to_string().contains("/nonexistent/dungeondoor.toml"));
}

#[tokio::test]
async fn custom_start_and_seed_apply_to_sessions() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("custom.toml");
    std::fs::write(
        &path,
        "[game]\nseed = 11\n[game.start]\nhp = 40\nmax_hp = 60\ngold = 0\n",
    )
    .unwrap();
    let cfg = Config::load(&path.to_string_lossy()).await.unwrap();
    let d = Dungeon::new(cfg.game).unwrap();
    let s = d.new_session();
    assert_eq!(s.seed, 11);
    assert_eq!((s.player.hp, s.player.max_hp, s.player.gold), (40, 60, 0));
}
