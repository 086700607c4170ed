use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Lay out a shop root with a persisted configuration for one shop.
fn shop_root(shop_id: u32, configuration_yaml: &str) -> TempDir {
    let root = tempdir().expect("Failed to create temp directory");
    seed_configuration(root.path(), shop_id, configuration_yaml);
    root
}

fn seed_configuration(base_dir: &Path, shop_id: u32, configuration_yaml: &str) {
    let shops_dir = base_dir.join("config").join("shops");
    fs::create_dir_all(&shops_dir).expect("Failed to create shops directory");
    fs::write(shops_dir.join(format!("{shop_id}.yaml")), configuration_yaml)
        .expect("Failed to write shop configuration");
}

fn shopmod(base_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shopmod").expect("Binary not built");
    cmd.arg("--base-dir").arg(base_dir);
    cmd
}

const ONE_MODULE: &str = "\
shop_id: 1
module_configurations:
- id: testmodule
  path: testmodule
active_modules: []
";

#[test]
fn test_activate_prints_activated_message() -> Result<(), Box<dyn std::error::Error>> {
    let root = shop_root(1, ONE_MODULE);

    shopmod(root.path())
        .args(["module", "activate", "testmodule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Module - \"testmodule\" was activated."));

    Ok(())
}

#[test]
fn test_second_activation_prints_already_active() -> Result<(), Box<dyn std::error::Error>> {
    let root = shop_root(1, ONE_MODULE);

    shopmod(root.path())
        .args(["module", "activate", "testmodule"])
        .assert()
        .success();

    shopmod(root.path())
        .args(["module", "activate", "testmodule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Module - \"testmodule\" already active."))
        .stdout(predicate::str::contains("was activated").not());

    Ok(())
}

#[test]
fn test_activating_unknown_module_fails() -> Result<(), Box<dyn std::error::Error>> {
    let root = shop_root(1, ONE_MODULE);

    shopmod(root.path())
        .args(["module", "activate", "test"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Module - \"test\" not found."));

    Ok(())
}

#[test]
fn test_deactivate_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let root = shop_root(1, ONE_MODULE);

    shopmod(root.path())
        .args(["module", "deactivate", "testmodule"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Module - \"testmodule\" already inactive.",
        ));

    shopmod(root.path())
        .args(["module", "activate", "testmodule"])
        .assert()
        .success();

    shopmod(root.path())
        .args(["module", "deactivate", "testmodule"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Module - \"testmodule\" was deactivated.",
        ));

    Ok(())
}

#[test]
fn test_list_shows_activation_state() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = "\
shop_id: 1
module_configurations:
- id: active_module
  path: active_module
  version: 2.1.0
- id: inactive_module
  path: inactive_module
active_modules:
- active_module
";
    let root = shop_root(1, configuration);

    shopmod(root.path())
        .args(["module", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Id: active_module, Version: 2.1.0, Status: Active",
        ))
        .stdout(predicate::str::contains("Id: inactive_module, Status: Inactive"));

    Ok(())
}

#[test]
fn test_list_without_configuration_reports_empty() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;

    shopmod(root.path())
        .args(["module", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No modules configured for shop 1."));

    Ok(())
}

#[test]
fn test_shop_id_selects_the_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let root = shop_root(1, ONE_MODULE);
    seed_configuration(
        root.path(),
        2,
        "\
shop_id: 2
module_configurations:
- id: subshop_module
  path: subshop_module
active_modules: []
",
    );

    shopmod(root.path())
        .args(["module", "activate", "subshop_module", "--shop-id", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Module - \"subshop_module\" was activated.",
        ));

    // Shop 1 never declared that module.
    shopmod(root.path())
        .args(["module", "activate", "subshop_module"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_cleanup_deactivates_stale_registrations() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = "\
shop_id: 1
module_configurations:
- id: stale_module
  path: stale_module
  extensions:
    Article:
    - stale_module/ModuleArticle
active_modules:
- stale_module
";
    let root = shop_root(1, configuration);
    // The extension's backing file is never created, so the registration is
    // stale from the start.

    shopmod(root.path())
        .args(["module", "cleanup"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deactivated stale module registration \"stale_module\".",
        ));

    shopmod(root.path())
        .args(["module", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Id: stale_module, Status: Inactive"));

    Ok(())
}

#[test]
fn test_cleanup_with_healthy_modules_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = "\
shop_id: 1
module_configurations:
- id: healthy
  path: healthy
  extensions:
    Article:
    - healthy/ModuleArticle
active_modules:
- healthy
";
    let root = shop_root(1, configuration);
    let module_dir = root.path().join("modules").join("healthy");
    fs::create_dir_all(&module_dir)?;
    fs::write(module_dir.join("ModuleArticle.php"), "<?php\n")?;

    shopmod(root.path())
        .args(["module", "cleanup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean up for shop 1."));

    Ok(())
}
