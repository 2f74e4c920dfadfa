//! Menu tree of the rental manager
//!
//! Main Menu
//! ├── Rental Units
//! │   ├── Select Unit
//! │   │   ├── Transactions for Selected Unit
//! │   │   ├── Tenants for Selected Unit (shares Select Tenant / Add Tenant)
//! │   │   └── Manage Unit
//! │   └── Add Unit
//! ├── Tenants
//! │   ├── Select Tenant
//! │   │   ├── Payments
//! │   │   └── Manage Tenant
//! │   └── Add Tenant
//! └── Revenue

use crate::actions::{
    AddRecord, ClearSelection, DeleteSelected, GenerateRevenueReport, ReportScope,
    SelectRecord, ShowRollforward, ShowTransactionHistory, ShowTransactionSummary,
    UpdateSelected,
};
use crate::error::RentalResult;
use crate::menu::{MenuTree, NavCommand, NodeId, Procedure, Role, Title};
use crate::models::{Expense, Payment, Tenant, Unit};

/// Commands of menus that also offer "Previous Menu"
const WITH_BACK: [NavCommand; 3] = [NavCommand::GoBack, NavCommand::ReturnToRoot, NavCommand::Exit];

const MAIN_AND_EXIT: [NavCommand; 2] = [NavCommand::ReturnToRoot, NavCommand::Exit];

/// Build and validate the full menu tree
pub fn build_menu() -> RentalResult<MenuTree> {
    let mut tree = MenuTree::new("Main Menu")?;

    let tenants = tenant_menus(&mut tree)?;
    let units = unit_menus(&mut tree, &tenants)?;
    let revenue = revenue_menu(&mut tree)?;

    let root = tree.root();
    tree.add_children(root, &[units, tenants.menu, revenue])?;
    tree.add_command(root, NavCommand::Exit)?;

    tree.validate()?;
    log::debug!("Built menu tree with {} nodes", tree.len());
    Ok(tree)
}

/// Tenant screens reused under a selected unit
struct TenantMenus {
    menu: NodeId,
    select: NodeId,
    add: NodeId,
}

fn action<P: Procedure + 'static>(tree: &mut MenuTree, label: &str, procedure: P) -> RentalResult<NodeId> {
    let id = tree.add_node(label)?;
    tree.add_procedure(id, procedure)?;
    Ok(id)
}

fn menu(
    tree: &mut MenuTree,
    label: &str,
    children: &[NodeId],
    commands: &[NavCommand],
) -> RentalResult<NodeId> {
    let id = tree.add_node(label)?;
    fill(tree, id, children, commands)?;
    Ok(id)
}

fn fill(tree: &mut MenuTree, id: NodeId, children: &[NodeId], commands: &[NavCommand]) -> RentalResult<()> {
    tree.add_children(id, children)?;
    tree.add_commands(id, commands)
}

fn about(tree: &mut MenuTree, id: NodeId, role: Role) -> RentalResult<NodeId> {
    tree.set_title(id, Title::OptionsFor(role))?;
    Ok(id)
}

fn tenant_menus(tree: &mut MenuTree) -> RentalResult<TenantMenus> {
    let rollforward = action(tree, "View Payments Rollforward", ShowRollforward)?;
    let view_payments = action(tree, "View Payments", SelectRecord::<Payment>::new())?;
    let update_payment = action(tree, "Update Payment Information", UpdateSelected::<Payment>::new())?;
    let delete_payment = action(tree, "Delete Payment", DeleteSelected::<Payment>::new())?;
    fill(tree, view_payments, &[update_payment, delete_payment], &MAIN_AND_EXIT)?;
    about(tree, view_payments, Role::Payment)?;
    let add_payment = action(tree, "Add Payment", AddRecord::<Payment>::new())?;

    let payments = menu(tree, "Payments", &[rollforward, view_payments, add_payment], &MAIN_AND_EXIT)?;
    about(tree, payments, Role::Tenant)?;

    let update_tenant = action(tree, "Update Tenant Information", UpdateSelected::<Tenant>::new())?;
    let remove_tenant = action(tree, "Remove Tenant from Records", DeleteSelected::<Tenant>::new())?;
    let manage = menu(tree, "Manage Tenant", &[update_tenant, remove_tenant], &MAIN_AND_EXIT)?;
    about(tree, manage, Role::Tenant)?;

    let select = action(tree, "Select Tenant", SelectRecord::<Tenant>::new())?;
    fill(tree, select, &[payments, manage], &MAIN_AND_EXIT)?;
    about(tree, select, Role::Tenant)?;
    let add = action(tree, "Add Tenant", AddRecord::<Tenant>::new())?;

    // entering Tenants from the main menu lists tenants of every unit
    let menu_id = action(tree, "Tenants", ClearSelection(Role::Unit))?;
    fill(tree, menu_id, &[select, add], &MAIN_AND_EXIT)?;

    Ok(TenantMenus {
        menu: menu_id,
        select,
        add,
    })
}

fn unit_menus(tree: &mut MenuTree, tenants: &TenantMenus) -> RentalResult<NodeId> {
    let summary = action(
        tree,
        "Transaction Summary",
        ShowTransactionSummary(ReportScope::SelectedUnit),
    )?;
    let history = action(
        tree,
        "Transaction History",
        ShowTransactionHistory(ReportScope::SelectedUnit),
    )?;
    let view_expenses = action(tree, "View Expenses", SelectRecord::<Expense>::new())?;
    let update_expense = action(tree, "Update Expense Information", UpdateSelected::<Expense>::new())?;
    let delete_expense = action(tree, "Delete Expense", DeleteSelected::<Expense>::new())?;
    fill(tree, view_expenses, &[update_expense, delete_expense], &WITH_BACK)?;
    about(tree, view_expenses, Role::Expense)?;
    let add_expense = action(tree, "Add Expense", AddRecord::<Expense>::new())?;

    let transactions = menu(
        tree,
        "Transactions for Selected Unit",
        &[summary, history, view_expenses, add_expense],
        &WITH_BACK,
    )?;
    about(tree, transactions, Role::Unit)?;

    let unit_tenants = menu(
        tree,
        "Tenants for Selected Unit",
        &[tenants.select, tenants.add],
        &WITH_BACK,
    )?;
    about(tree, unit_tenants, Role::Unit)?;

    let update_unit = action(tree, "Update Unit Information", UpdateSelected::<Unit>::new())?;
    let delete_unit = action(tree, "Delete Unit Record", DeleteSelected::<Unit>::new())?;
    let manage = menu(tree, "Manage Unit", &[update_unit, delete_unit], &WITH_BACK)?;
    about(tree, manage, Role::Unit)?;

    let select = action(tree, "Select Unit", SelectRecord::<Unit>::new())?;
    fill(tree, select, &[transactions, unit_tenants, manage], &WITH_BACK)?;
    about(tree, select, Role::Unit)?;
    let add = action(tree, "Add Unit", AddRecord::<Unit>::new())?;

    menu(tree, "Rental Units", &[select, add], &MAIN_AND_EXIT)
}

fn revenue_menu(tree: &mut MenuTree) -> RentalResult<NodeId> {
    let summary = action(
        tree,
        "Summary of Income",
        ShowTransactionSummary(ReportScope::AllUnits),
    )?;
    let history = action(
        tree,
        "View All Transactions",
        ShowTransactionHistory(ReportScope::AllUnits),
    )?;
    let report = action(tree, "Generate Revenue Report", GenerateRevenueReport)?;

    menu(tree, "Revenue", &[summary, history, report], &MAIN_AND_EXIT)
}
