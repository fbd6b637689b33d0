#[macro_use]
mod common;
use common::prelude::*;

#[test]
fn empty() -> Result<()> {
    let env = Env::new()?;

    env.command()?
        .assert()
        .failure()
        .stderr(str::contains("Usage:"));

    cmd!(env, users).failure().stderr(str::contains("Usage:"));

    Ok(())
}

#[test]
fn unknown_entity() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, posts list)
        .failure()
        .stderr(str::contains("Unknown entity: posts"));

    Ok(())
}

#[test]
fn invalid_config() -> Result<()> {
    use assert_fs::fixture::{FileWriteStr, PathChild};

    let env = Env::empty()?;
    env.conf_dir
        .child("config.toml")
        .write_str("[entities.users]\nattributes = ['email']\nunique = ['login']")?;

    cmd!(env, users list)
        .failure()
        .stderr(str::contains("`login`"));

    env.conf_dir
        .child("config.toml")
        .write_str("[entities.users]\nattributes = ['email']\n[entities.users.types]\nemail = 'date'")?;

    cmd!(env, users list)
        .failure()
        .stderr(str::contains("date"));

    Ok(())
}

#[test]
fn data_dir() -> Result<()> {
    let env = Env::new()?;

    env.command()?
        .arg("-D")
        .arg(env.data_dir.path().join("missing"))
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(str::contains("Data directory is not a dir"));

    Ok(())
}
