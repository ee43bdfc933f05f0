//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for the wallet:
//!
//! - `assets`: value containers with a starting balance
//! - `categories`: income/expense classification, budgets attach here
//! - `ledgers`: free-form tags on entries
//! - `transactions`: base rows of the immutable ledger
//! - `income_expense_details`: direction, asset, category per entry
//! - `transfer_details`: source and destination asset per transfer
//! - `budgets`: monthly category caps with rollover settings
//! - `savings_goals`: progress toward a target amount

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Assets {
    Table,
    Id,
    Name,
    NameNorm,
    Icon,
    StartingBalance,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    NameNorm,
    Icon,
    Color,
    Kind,
}

#[derive(Iden)]
enum Ledgers {
    Table,
    Id,
    Name,
    NameNorm,
    Icon,
    Color,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Kind,
    Amount,
    Date,
    Receipt,
    Created,
    Updated,
}

#[derive(Iden)]
enum IncomeExpenseDetails {
    Table,
    Id,
    TransactionId,
    Kind,
    Particulars,
    AssetId,
    CategoryId,
    Ledgers,
    LocationName,
    LocationLat,
    LocationLon,
}

#[derive(Iden)]
enum TransferDetails {
    Table,
    Id,
    TransactionId,
    FromAssetId,
    ToAssetId,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    CategoryId,
    Year,
    Month,
    Amount,
    RolloverEnabled,
    RolloverCap,
    AlertThresholds,
    IsActive,
    Created,
    Updated,
}

#[derive(Iden)]
enum SavingsGoals {
    Table,
    Id,
    Name,
    Icon,
    Color,
    TargetAmount,
    CurrentAmount,
    TargetDate,
    AssetId,
    IsActive,
    Created,
    Updated,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Assets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Assets::Name).string().not_null())
                    .col(ColumnDef::new(Assets::NameNorm).string().not_null())
                    .col(ColumnDef::new(Assets::Icon).string().not_null())
                    .col(
                        ColumnDef::new(Assets::StartingBalance)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-assets-name_norm-unique")
                    .table(Assets::Table)
                    .col(Assets::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::NameNorm).string().not_null())
                    .col(ColumnDef::new(Categories::Icon).string().not_null())
                    .col(ColumnDef::new(Categories::Color).string().not_null())
                    .col(ColumnDef::new(Categories::Kind).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-name_norm-kind-unique")
                    .table(Categories::Table)
                    .col(Categories::NameNorm)
                    .col(Categories::Kind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Ledgers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Ledgers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ledgers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ledgers::Name).string().not_null())
                    .col(ColumnDef::new(Ledgers::NameNorm).string().not_null())
                    .col(ColumnDef::new(Ledgers::Icon).string().not_null())
                    .col(ColumnDef::new(Ledgers::Color).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ledgers-name_norm-unique")
                    .table(Ledgers::Table)
                    .col(Ledgers::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::Amount).double().not_null())
                    .col(ColumnDef::new(Transactions::Date).date().not_null())
                    .col(ColumnDef::new(Transactions::Receipt).string())
                    .col(ColumnDef::new(Transactions::Created).timestamp().not_null())
                    .col(ColumnDef::new(Transactions::Updated).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-date")
                    .table(Transactions::Table)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Income/expense details
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(IncomeExpenseDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IncomeExpenseDetails::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IncomeExpenseDetails::TransactionId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IncomeExpenseDetails::Kind).string().not_null())
                    .col(
                        ColumnDef::new(IncomeExpenseDetails::Particulars)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncomeExpenseDetails::AssetId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncomeExpenseDetails::CategoryId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncomeExpenseDetails::Ledgers)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(IncomeExpenseDetails::LocationName).string())
                    .col(ColumnDef::new(IncomeExpenseDetails::LocationLat).double())
                    .col(ColumnDef::new(IncomeExpenseDetails::LocationLon).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-income_expense_details-transaction_id")
                            .from(
                                IncomeExpenseDetails::Table,
                                IncomeExpenseDetails::TransactionId,
                            )
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-income_expense_details-transaction_id-unique")
                    .table(IncomeExpenseDetails::Table)
                    .col(IncomeExpenseDetails::TransactionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-income_expense_details-asset_id")
                    .table(IncomeExpenseDetails::Table)
                    .col(IncomeExpenseDetails::AssetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-income_expense_details-category_id")
                    .table(IncomeExpenseDetails::Table)
                    .col(IncomeExpenseDetails::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Transfer details
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(TransferDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransferDetails::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransferDetails::TransactionId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferDetails::FromAssetId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferDetails::ToAssetId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transfer_details-transaction_id")
                            .from(TransferDetails::Table, TransferDetails::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfer_details-transaction_id-unique")
                    .table(TransferDetails::Table)
                    .col(TransferDetails::TransactionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfer_details-from_asset_id")
                    .table(TransferDetails::Table)
                    .col(TransferDetails::FromAssetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfer_details-to_asset_id")
                    .table(TransferDetails::Table)
                    .col(TransferDetails::ToAssetId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Budgets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::CategoryId).string().not_null())
                    .col(ColumnDef::new(Budgets::Year).integer().not_null())
                    .col(ColumnDef::new(Budgets::Month).integer().not_null())
                    .col(ColumnDef::new(Budgets::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Budgets::RolloverEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Budgets::RolloverCap)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(
                        ColumnDef::new(Budgets::AlertThresholds)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Budgets::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Budgets::Created).timestamp().not_null())
                    .col(ColumnDef::new(Budgets::Updated).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-category_id")
                            .from(Budgets::Table, Budgets::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-category_id-year-month")
                    .table(Budgets::Table)
                    .col(Budgets::CategoryId)
                    .col(Budgets::Year)
                    .col(Budgets::Month)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Savings goals
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SavingsGoals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavingsGoals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavingsGoals::Name).string().not_null())
                    .col(ColumnDef::new(SavingsGoals::Icon).string().not_null())
                    .col(ColumnDef::new(SavingsGoals::Color).string().not_null())
                    .col(
                        ColumnDef::new(SavingsGoals::TargetAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(SavingsGoals::CurrentAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(SavingsGoals::TargetDate).date())
                    .col(ColumnDef::new(SavingsGoals::AssetId).string())
                    .col(
                        ColumnDef::new(SavingsGoals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(SavingsGoals::Created).timestamp().not_null())
                    .col(ColumnDef::new(SavingsGoals::Updated).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavingsGoals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransferDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IncomeExpenseDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ledgers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        Ok(())
    }
}
