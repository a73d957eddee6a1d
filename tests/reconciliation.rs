//! Integration tests for reconciling a session's cart and wishlist with a stored copy.
//!
//! A session's local cart holds:
//!
//! - Nida Abaya (Size: M) x2 at Rs. 6500.50
//! - Jersey Hijab x1 at Rs. 900
//!
//! The customer's stored cart holds:
//!
//! - Nida Abaya (Size: M) x5 at Rs. 7000 (an older copy of the same line)
//! - Printed Lawn Suit (Color: Red) x1 at Rs. 3200
//!
//! Reconciling keeps both local lines untouched and adopts the lawn suit.

use rust_decimal::Decimal;
use testresult::TestResult;

use boutique::prelude::*;

fn snapshot(name: &str, image: &str, price: Decimal) -> ProductSnapshot {
    ProductSnapshot::new(ProductDisplay::new(name, image), price)
}

fn abaya(price: Decimal) -> ProductSnapshot {
    snapshot("Nida Abaya", "abaya.jpg", price)
}

fn medium() -> SelectedAttributes {
    SelectedAttributes::new().with("Size", "M")
}

fn local_cart() -> Result<Cart, CartError> {
    let mut cart = Cart::new();

    cart.add_item("abaya".into(), &abaya(Decimal::new(650_050, 2)), 2, medium())?;
    cart.add_item(
        "hijab".into(),
        &snapshot("Jersey Hijab", "hijab.jpg", Decimal::from(900)),
        1,
        SelectedAttributes::new(),
    )?;

    Ok(cart)
}

fn stored_cart() -> Result<Cart, CartError> {
    let mut cart = Cart::new();

    cart.add_item("abaya".into(), &abaya(Decimal::from(7000)), 5, medium())?;
    cart.add_item(
        "lawn-suit".into(),
        &snapshot("Printed Lawn Suit", "lawn.jpg", Decimal::from(3200)),
        1,
        SelectedAttributes::new().with("Color", "Red"),
    )?;

    Ok(cart)
}

#[test]
fn local_lines_win_and_remote_only_lines_are_adopted() -> TestResult {
    let local = local_cart()?;
    let remote = stored_cart()?;

    let merged = reconcile(local.items(), remote.items());
    let cart = Cart::with_items(merged.items);

    assert_eq!(merged.adopted, 1);
    assert_eq!(merged.conflicts, 1);
    assert_eq!(cart.len(), 3);

    let abaya = cart.get_item(0)?;
    assert_eq!(abaya.quantity().get(), 2);
    assert_eq!(abaya.price_at_add(), Decimal::new(650_050, 2));

    assert_eq!(cart.get_item(2)?.product_id().as_str(), "lawn-suit");

    Ok(())
}

#[test]
fn reconciling_twice_changes_nothing() -> TestResult {
    let local = local_cart()?;
    let remote = stored_cart()?;

    let once = Cart::with_items(reconcile(local.items(), remote.items()).items);
    let again = reconcile(once.items(), remote.items());

    assert_eq!(again.adopted, 0);
    assert_eq!(Cart::with_items(again.items), once);

    Ok(())
}

#[test]
fn merged_cart_keeps_one_line_per_key() -> TestResult {
    let local = local_cart()?;
    let remote = stored_cart()?;

    let cart = Cart::with_items(reconcile(local.items(), remote.items()).items);

    for (index, item) in cart.iter().enumerate() {
        assert_eq!(cart.position(&item.key()), Some(index), "duplicate key at {index}");
    }

    Ok(())
}

#[test]
fn empty_local_adopts_the_stored_cart() -> TestResult {
    let remote = stored_cart()?;

    let merged = reconcile(Cart::new().items(), remote.items());

    assert_eq!(merged.adopted, remote.len());
    assert_eq!(Cart::with_items(merged.items), remote);

    Ok(())
}

#[test]
fn captured_price_survives_price_changes_and_merges() -> TestResult {
    let mut cart = local_cart()?;

    cart.add_item("abaya".into(), &abaya(Decimal::from(9999)), 1, medium())?;

    let merged = Cart::with_items(reconcile(cart.items(), stored_cart()?.items()).items);
    let line = merged.get_item(0)?;

    assert_eq!(line.quantity().get(), 3);
    assert_eq!(line.price_at_add(), Decimal::new(650_050, 2));

    Ok(())
}

#[test]
fn merged_subtotal_is_formatted_in_rupees() -> TestResult {
    let cart = Cart::with_items(reconcile(local_cart()?.items(), stored_cart()?.items()).items);

    let subtotal = cart.subtotal()?;

    // 2 x 6500.50 + 900 + 3200
    assert_eq!(
        format_currency(boutique::pricing::to_decimal(&subtotal)),
        "Rs. 17101"
    );

    Ok(())
}

#[test]
fn quantity_never_drops_below_one() -> TestResult {
    let mut cart = local_cart()?;

    assert_eq!(cart.update_quantity(0, 0), Err(CartError::InvalidQuantity));
    assert_eq!(cart.get_item(0)?.quantity().get(), 2);

    Ok(())
}

#[test]
fn wishlists_union_by_product() -> TestResult {
    let kaftan = snapshot("Embroidered Kaftan", "kaftan.jpg", Decimal::from(4200));
    let hijab = snapshot("Jersey Hijab", "hijab.jpg", Decimal::from(900));

    let mut local = Wishlist::new();
    local.add("kaftan".into(), &kaftan)?;

    let mut remote = Wishlist::new();
    remote.add("hijab".into(), &hijab)?;
    remote.add("kaftan".into(), &kaftan)?;

    let merged = reconcile(local.items(), remote.items());
    let wishlist = Wishlist::with_items(merged.items);

    assert_eq!(merged.conflicts, 1);
    assert_eq!(wishlist.len(), 2);
    assert!(wishlist.contains(&"hijab".into()));

    Ok(())
}
