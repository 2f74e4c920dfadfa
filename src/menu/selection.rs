//! Records chosen during a session
//!
//! Screens deeper in the menu act on whatever the user picked further up:
//! the unit whose tenants are listed, the tenant whose payments are shown.

use crate::models::{Expense, ExpenseId, Payment, PaymentId, Tenant, TenantId, Unit, UnitId};
use crate::storage::Stored;

/// Which selection slot a screen works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Unit,
    Tenant,
    Payment,
    Expense,
}

/// Current selection, one slot per role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub unit: Option<UnitId>,
    pub tenant: Option<TenantId>,
    pub payment: Option<PaymentId>,
    pub expense: Option<ExpenseId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear a slot and every slot that depends on it
    pub fn clear(&mut self, role: Role) {
        match role {
            Role::Unit => *self = Self::default(),
            Role::Tenant => {
                self.tenant = None;
                self.payment = None;
            }
            Role::Payment => self.payment = None,
            Role::Expense => self.expense = None,
        }
    }

    pub fn is_set(&self, role: Role) -> bool {
        match role {
            Role::Unit => self.unit.is_some(),
            Role::Tenant => self.tenant.is_some(),
            Role::Payment => self.payment.is_some(),
            Role::Expense => self.expense.is_some(),
        }
    }
}

/// A record type that can fill a selection slot
pub trait Selectable: Stored {
    const ROLE: Role;

    fn slot(selection: &mut Selection) -> &mut Option<Self::Id>;

    fn selected(selection: &Selection) -> Option<Self::Id>;

    /// Fill the slot, dropping selections made under the previous record
    fn select(selection: &mut Selection, id: Self::Id) {
        selection.clear(Self::ROLE);
        *Self::slot(selection) = Some(id);
    }
}

impl Selectable for Unit {
    const ROLE: Role = Role::Unit;

    fn slot(selection: &mut Selection) -> &mut Option<UnitId> {
        &mut selection.unit
    }

    fn selected(selection: &Selection) -> Option<UnitId> {
        selection.unit
    }
}

impl Selectable for Tenant {
    const ROLE: Role = Role::Tenant;

    fn slot(selection: &mut Selection) -> &mut Option<TenantId> {
        &mut selection.tenant
    }

    fn selected(selection: &Selection) -> Option<TenantId> {
        selection.tenant
    }
}

impl Selectable for Payment {
    const ROLE: Role = Role::Payment;

    fn slot(selection: &mut Selection) -> &mut Option<PaymentId> {
        &mut selection.payment
    }

    fn selected(selection: &Selection) -> Option<PaymentId> {
        selection.payment
    }
}

impl Selectable for Expense {
    const ROLE: Role = Role::Expense;

    fn slot(selection: &mut Selection) -> &mut Option<ExpenseId> {
        &mut selection.expense
    }

    fn selected(selection: &Selection) -> Option<ExpenseId> {
        selection.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_unit_drops_everything_below() {
        let mut selection = Selection {
            unit: Some(UnitId::new()),
            tenant: Some(TenantId::new()),
            payment: Some(PaymentId::new()),
            expense: Some(ExpenseId::new()),
        };

        let unit = UnitId::new();
        Unit::select(&mut selection, unit);

        assert_eq!(selection.unit, Some(unit));
        assert!(!selection.is_set(Role::Tenant));
        assert!(!selection.is_set(Role::Payment));
        assert!(!selection.is_set(Role::Expense));
    }

    #[test]
    fn test_selecting_tenant_keeps_unit() {
        let unit = UnitId::new();
        let mut selection = Selection {
            unit: Some(unit),
            payment: Some(PaymentId::new()),
            ..Selection::default()
        };

        let tenant = TenantId::new();
        Tenant::select(&mut selection, tenant);

        assert_eq!(selection.unit, Some(unit));
        assert_eq!(Tenant::selected(&selection), Some(tenant));
        assert_eq!(selection.payment, None);
    }

    #[test]
    fn test_clear_expense_only() {
        let unit = UnitId::new();
        let mut selection = Selection {
            unit: Some(unit),
            expense: Some(ExpenseId::new()),
            ..Selection::default()
        };

        selection.clear(Role::Expense);
        assert_eq!(selection, Selection { unit: Some(unit), ..Selection::default() });
    }
}
