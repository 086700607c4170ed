use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::debug;

use shopmod_core::module_system::LocalFileChecker;
use shopmod_core::{
    DefaultModuleActivationBridge, FileLockRegistry, LocalStorageProvider, ModuleActivationBridge,
    ModuleList, ModuleSystemError, ShopConfigurationDao, ShopContext,
};

/// Shopmod: per-shop module configuration and activation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Shop the command operates on
    #[arg(long, global = true, default_value_t = 1)]
    shop_id: u32,

    /// Shop root directory containing config/ and modules/
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage shop modules
    Module {
        #[command(subcommand)]
        command: ModuleCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ModuleCommand {
    /// Activate a module for the shop
    Activate {
        /// The id of the module to activate
        module_id: String,
    },
    /// Deactivate a module for the shop
    Deactivate {
        /// The id of the module to deactivate
        module_id: String,
    },
    /// List declared modules and their activation state
    List {},
    /// Deactivate modules whose backing files vanished from disk
    Cleanup {},
}

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG-driven; a second init (e.g. under a test harness) is harmless.
    if let Err(e) = env_logger::try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let args = CliArgs::parse();
    debug!(
        "Operating on shop {} under {}",
        args.shop_id,
        args.base_dir.display()
    );

    let context = ShopContext::from_base_dir(args.shop_id, &args.base_dir);
    let provider = Arc::new(LocalStorageProvider::new(args.base_dir.clone()));
    let locks = Arc::new(FileLockRegistry::new());
    let dao = Arc::new(ShopConfigurationDao::new(provider, locks, context.config_dir()));

    let Commands::Module { command } = args.command;
    match command {
        ModuleCommand::Activate { module_id } => {
            let bridge = DefaultModuleActivationBridge::new(dao);
            let was_active = bridge.is_active(&module_id, args.shop_id);
            match bridge.activate(&module_id, args.shop_id).await {
                Ok(()) if was_active => {
                    println!("Module - \"{}\" already active.", module_id);
                    ExitCode::SUCCESS
                }
                Ok(()) => {
                    println!("Module - \"{}\" was activated.", module_id);
                    ExitCode::SUCCESS
                }
                Err(ModuleSystemError::ModuleNotFound { .. }) => {
                    println!("Module - \"{}\" not found.", module_id);
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("Error activating module '{}': {}", module_id, e);
                    ExitCode::FAILURE
                }
            }
        }
        ModuleCommand::Deactivate { module_id } => {
            let bridge = DefaultModuleActivationBridge::new(dao);
            let was_active = bridge.is_active(&module_id, args.shop_id);
            match bridge.deactivate(&module_id, args.shop_id).await {
                Ok(()) if !was_active => {
                    println!("Module - \"{}\" already inactive.", module_id);
                    ExitCode::SUCCESS
                }
                Ok(()) => {
                    println!("Module - \"{}\" was deactivated.", module_id);
                    ExitCode::SUCCESS
                }
                Err(ModuleSystemError::ModuleNotFound { .. }) => {
                    println!("Module - \"{}\" not found.", module_id);
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("Error deactivating module '{}': {}", module_id, e);
                    ExitCode::FAILURE
                }
            }
        }
        ModuleCommand::List {} => {
            let configuration = dao.get(args.shop_id);
            if configuration.module_configurations().is_empty() {
                println!("No modules configured for shop {}.", args.shop_id);
            } else {
                println!("Modules configured for shop {}:", args.shop_id);
                for module in configuration.module_configurations() {
                    let status = if configuration.is_active(module.id()) {
                        "Active"
                    } else {
                        "Inactive"
                    };
                    match module.version() {
                        Some(version) => println!(
                            "  - Id: {}, Version: {}, Status: {}",
                            module.id(),
                            version,
                            status
                        ),
                        None => println!("  - Id: {}, Status: {}", module.id(), status),
                    }
                }
            }
            ExitCode::SUCCESS
        }
        ModuleCommand::Cleanup {} => {
            let mut list = ModuleList::new(dao, &context, Arc::new(LocalFileChecker));
            let stale: Vec<String> = list.deleted_extensions().keys().cloned().collect();
            if stale.is_empty() {
                println!("Nothing to clean up for shop {}.", args.shop_id);
                return ExitCode::SUCCESS;
            }
            match list.cleanup().await {
                Ok(()) => {
                    for module_id in &stale {
                        println!("Deactivated stale module registration \"{}\".", module_id);
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error cleaning up shop {}: {}", args.shop_id, e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
