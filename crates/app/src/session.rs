//! Session
//!
//! Reacts to sign-in and sign-out by reconciling or detaching the session lists.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    domain::{carts::CartsService, identity::IdentityService, wishlists::WishlistsService},
    subscription::Subscription,
    users::UserId,
};

/// Start listening for identity changes.
///
/// Each sign-in, including a switch to another user, reconciles the cart and the wishlist with
/// that user's stored copies. A sign-out detaches both lists from the previous user and keeps
/// their contents on the device. A user already signed in when the listener starts is
/// reconciled straight away.
pub fn watch_identity(
    identity: &dyn IdentityService,
    carts: Arc<dyn CartsService>,
    wishlists: Arc<dyn WishlistsService>,
) -> Subscription {
    let mut receiver = identity.watch();

    let task = tokio::spawn(async move {
        let mut current: Option<UserId> = None;

        loop {
            let next = receiver.borrow_and_update().clone();

            if next != current {
                if current.is_some() {
                    carts.detach_remote().await;
                    wishlists.detach_remote().await;
                }

                match &next {
                    Some(user) => sync_lists(user, carts.as_ref(), wishlists.as_ref()).await,
                    None => info!("signed out, keeping lists on device"),
                }

                current = next;
            }

            if receiver.changed().await.is_err() {
                debug!("identity source closed");

                break;
            }
        }
    });

    Subscription::new(task)
}

async fn sync_lists(user: &UserId, carts: &dyn CartsService, wishlists: &dyn WishlistsService) {
    info!(user = %user, "signed in, reconciling lists");

    let (cart, wishlist) = tokio::join!(carts.sync_with_remote(), wishlists.sync_with_remote());

    match cart {
        Ok(report) => debug!(user = %user, adopted = report.adopted, "cart reconciled"),
        Err(error) => warn!(user = %user, ?error, "cart left unsynced"),
    }

    match wishlist {
        Ok(report) => debug!(user = %user, adopted = report.adopted, "wishlist reconciled"),
        Err(error) => warn!(user = %user, ?error, "wishlist left unsynced"),
    }
}
