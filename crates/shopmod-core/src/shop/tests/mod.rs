use std::path::Path;

use crate::shop::context::ShopContext;

#[test]
fn test_from_base_dir_convention() {
    let context = ShopContext::from_base_dir(1, Path::new("/var/www/shop"));
    assert_eq!(context.shop_id(), 1);
    assert_eq!(context.config_dir(), Path::new("/var/www/shop/config"));
    assert_eq!(context.modules_dir(), Path::new("/var/www/shop/modules"));
}

#[test]
fn test_explicit_directories() {
    let context = ShopContext::new(
        2,
        Path::new("/etc/shop").to_path_buf(),
        Path::new("/opt/shop/modules").to_path_buf(),
    );
    assert_eq!(context.shop_id(), 2);
    assert_eq!(context.config_dir(), Path::new("/etc/shop"));
    assert_eq!(context.modules_dir(), Path::new("/opt/shop/modules"));
}
