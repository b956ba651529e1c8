//! # Register State
//!
//! Shares the till's `Register` between commands.
//!
//! ## Thread Safety
//! The register is wrapped in `Arc<Mutex<T>>`. A whole command, including
//! the four-step checkout, runs under a single lock.

use std::sync::{Arc, Mutex, PoisonError};

use tally_core::Register;

/// Shared register state.
#[derive(Debug, Clone)]
pub struct RegisterState {
    register: Arc<Mutex<Register>>,
}

impl RegisterState {
    pub fn new(register: Register) -> Self {
        RegisterState {
            register: Arc::new(Mutex::new(register)),
        }
    }

    /// Executes a function with read access to the register.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = state.with_register(|r| r.cart_total());
    /// ```
    pub fn with_register<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Register) -> R,
    {
        // Register methods never leave state half-written.
        let register = self.register.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*register)
    }

    /// Executes a function with write access to the register.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_register_mut(|r| r.checkout(PaymentMethod::Cash))?;
    /// ```
    pub fn with_register_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Register) -> R,
    {
        let mut register = self.register.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *register)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{ItemId, PaymentMethod};

    #[test]
    fn test_shared_between_clones() {
        let state = RegisterState::new(Register::seeded().unwrap());
        let other = state.clone();
        let item1: ItemId = "item1".parse().unwrap();

        other
            .with_register_mut(|r| r.update_quantity(&item1, 3))
            .unwrap();

        assert_eq!(state.with_register(|r| r.cart_total().minor()), 60);
    }

    #[test]
    fn test_checkout_across_threads() {
        let state = RegisterState::new(Register::seeded().unwrap());
        let item1: ItemId = "item1".parse().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                let item1 = item1.clone();
                std::thread::spawn(move || {
                    state.with_register_mut(|r| {
                        r.update_quantity(&item1, 1).unwrap();
                        r.checkout(PaymentMethod::Cash).unwrap();
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        state.with_register(|r| {
            assert_eq!(r.transaction_history().len(), 4);
            assert_eq!(r.sales_summary().cash_total.minor(), 80);
            assert_eq!(r.inventory_snapshot()[&item1].stock, 996);
        });
    }
}
