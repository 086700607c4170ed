use tempfile::tempdir;

use crate::module_system::configuration::ModuleConfiguration;
use crate::module_system::shop_configuration::ShopConfiguration;
use crate::module_system::smarty::SmartyPluginDirectoriesResolver;
use crate::shop::context::ShopContext;

#[test]
fn test_module_directories_precede_shop_directories() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let context = ShopContext::from_base_dir(1, temp_dir.path());

    let mut configuration = ShopConfiguration::new(1);
    configuration.add_module_configuration(
        ModuleConfiguration::new("with_metadata_v21", "oeTest/with_metadata_v21")
            .with_smarty_plugin_directory("Smarty/PluginDirectory1WithMetadataVersion21")
            .with_smarty_plugin_directory("Smarty/PluginDirectory2WithMetadataVersion21"),
    );
    configuration.activate("with_metadata_v21");

    let shop_core_dir = context.modules_dir().parent().unwrap().join("Core/Smarty/Plugin");
    let resolver = SmartyPluginDirectoriesResolver::new(&context, vec![shop_core_dir.clone()]);

    let directories = resolver.resolve(&configuration);
    assert_eq!(directories.len(), 3);
    assert!(directories[0].ends_with(
        "oeTest/with_metadata_v21/Smarty/PluginDirectory1WithMetadataVersion21"
    ));
    assert!(directories[1].ends_with(
        "oeTest/with_metadata_v21/Smarty/PluginDirectory2WithMetadataVersion21"
    ));
    assert_eq!(directories[2], shop_core_dir);
}

#[test]
fn test_modules_contribute_in_activation_order() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let context = ShopContext::from_base_dir(1, temp_dir.path());

    let mut configuration = ShopConfiguration::new(1);
    configuration.add_module_configuration(
        ModuleConfiguration::new("module_a", "module_a").with_smarty_plugin_directory("Smarty"),
    );
    configuration.add_module_configuration(
        ModuleConfiguration::new("module_b", "module_b").with_smarty_plugin_directory("Smarty"),
    );
    configuration.activate("module_b");
    configuration.activate("module_a");

    let resolver = SmartyPluginDirectoriesResolver::new(&context, Vec::new());
    let directories = resolver.resolve(&configuration);

    assert!(directories[0].ends_with("module_b/Smarty"));
    assert!(directories[1].ends_with("module_a/Smarty"));
}

#[test]
fn test_inactive_modules_contribute_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let context = ShopContext::from_base_dir(1, temp_dir.path());

    let mut configuration = ShopConfiguration::new(1);
    configuration.add_module_configuration(
        ModuleConfiguration::new("module_a", "module_a").with_smarty_plugin_directory("Smarty"),
    );

    let resolver = SmartyPluginDirectoriesResolver::new(&context, Vec::new());
    assert!(resolver.resolve(&configuration).is_empty());
}
