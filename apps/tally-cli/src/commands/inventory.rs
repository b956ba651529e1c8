//! # Inventory Commands
//!
//! Read-only views of the catalog and the active promotions.

use tracing::debug;

use crate::commands::Response;
use crate::state::RegisterState;

/// Gets stock levels for every item.
pub fn get_inventory(state: &RegisterState) -> Response {
    debug!("get_inventory command");
    Response::Inventory {
        items: state.with_register(|r| r.inventory_snapshot()),
    }
}

/// Gets the bonus offers.
pub fn get_offers(state: &RegisterState) -> Response {
    debug!("get_offers command");
    Response::Offers {
        offers: state.with_register(|r| r.offers()),
    }
}
