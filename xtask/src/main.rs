// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Lint, build and test orchestration for the workspace, plus a migration
//! check for the `SQLite` store.
//!
//! - `cargo xtask ci` runs lint, deny, machete, build, test and migration checks
//! - `cargo xtask verify-migrations` applies, reverts and reapplies every
//!   migration on a scratch database and fails if the schema drifts

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Tables the persistence crate expects after all migrations ran.
const EXPECTED_TABLES: [&str; 6] = [
    "audit_events",
    "employees",
    "leave_applications",
    "ledger_sequences",
    "policy_groups",
    "policy_records",
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Everything a merge has to pass
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Audit licenses and advisories with cargo-deny
    Deny,

    /// Report unused dependencies with cargo-machete
    Machete,

    /// Clippy, rustdoc, rustfmt and typos
    #[command(visible_alias = "l")]
    Lint,

    /// Clippy with warnings denied
    LintClippy,

    /// Rustdoc with warnings denied
    LintDocs,

    /// Rustfmt in check mode
    LintFormatting,

    /// Spelling check with typos-cli
    LintTypos,

    /// Reformat the workspace
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Unit, integration and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Apply, revert and reapply migrations on a scratch database
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => cargo(&["build", "--workspace", "--all-targets"]),
            Self::Deny => cargo(&["deny", "check"]),
            Self::Machete => {
                cmd!("cargo-machete").run_with_trace()?;
                Ok(())
            }
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => cargo_nightly(&["fmt", "--all", "--check"]),
            Self::LintTypos => {
                cmd!("typos").run_with_trace()?;
                Ok(())
            }
            Self::FixFormatting => cargo_nightly(&["fmt", "--all"]),
            Self::Test => cargo(&["test", "--workspace", "--all-targets"])
                .and_then(|()| cargo(&["test", "--workspace", "--doc"])),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    for step in [
        Command::Lint,
        Command::Deny,
        Command::Machete,
        Command::Build,
        Command::Test,
        Command::VerifyMigrations,
    ] {
        step.run()?;
    }
    Ok(())
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    Command::LintFormatting.run()?;
    Command::LintTypos.run()
}

fn lint_clippy() -> Result<()> {
    cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])
}

/// Builds the workspace docs the way docs.rs would, failing on any warning
fn lint_docs() -> Result<()> {
    cmd("cargo", ["doc", "--workspace", "--no-deps"])
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Like [`cargo`], on the nightly toolchain
fn cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // set by cargo for subcommands; it would pin the stable toolchain
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify that the `SQLite` migrations are reversible
///
/// ## What This Command Does
///
/// 1. Opens a scratch in-memory `SQLite` database with foreign keys on
/// 2. Applies every migration and checks the expected tables exist
/// 3. Reverts every migration and checks no table is left behind
/// 4. Reapplies every migration and checks the schema is unchanged
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-migrations
/// ```
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    #[allow(clippy::items_after_statements)]
    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {e}"))?;
    let applied = introspect_sqlite_schema(&mut conn)?;

    let missing: Vec<&str> = EXPECTED_TABLES
        .iter()
        .copied()
        .filter(|table| !applied.tables.contains_key(*table))
        .collect();
    if !missing.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "Migrations did not create tables: {}",
            missing.join(", ")
        ));
    }
    tracing::info!("Applied {} tables", applied.tables.len());

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert migrations: {e}"))?;
    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        let leftover: Vec<&str> = reverted.tables.keys().map(String::as_str).collect();
        return Err(color_eyre::eyre::eyre!(
            "Tables left after revert: {}",
            leftover.join(", ")
        ));
    }
    tracing::info!("Reverted all migrations");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to reapply migrations: {e}"))?;
    let reapplied = introspect_sqlite_schema(&mut conn)?;
    compare_schemas(&applied, &reapplied)?;

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    name: String,
    declared_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    name: col.name.clone(),
                    declared_type: col.r#type.to_uppercase(),
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // Origin 'u' covers UNIQUE constraints, including sqlite_autoindex_*
            if idx.origin == "u" {
                table_info.unique_constraints.insert(UniqueConstraint {
                    columns: column_names,
                });
            } else if !idx.name.starts_with("sqlite_autoindex_") {
                table_info.indexes.insert(Index {
                    name: idx.name,
                    columns: column_names,
                });
            }
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Compare the first application of the migrations with a reapplication
fn compare_schemas(first: &Schema, second: &Schema) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    let first_tables: BTreeSet<&String> = first.tables.keys().collect();
    let second_tables: BTreeSet<&String> = second.tables.keys().collect();
    for table in first_tables.symmetric_difference(&second_tables) {
        errors.push(format!("Table '{table}' exists in only one application"));
    }

    for (name, table) in &first.tables {
        let Some(other) = second.tables.get(name) else {
            continue;
        };
        if table.columns != other.columns {
            errors.push(format!("Columns of '{name}' differ after reapply"));
        }
        if table.primary_keys != other.primary_keys {
            errors.push(format!("Primary key of '{name}' differs after reapply"));
        }
        if table.foreign_keys != other.foreign_keys {
            errors.push(format!("Foreign keys of '{name}' differ after reapply"));
        }
        if table.unique_constraints != other.unique_constraints {
            errors.push(format!("Unique constraints of '{name}' differ after reapply"));
        }
        if table.indexes != other.indexes {
            errors.push(format!("Indexes of '{name}' differ after reapply"));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    for error in &errors {
        tracing::error!("{error}");
    }
    Err(color_eyre::eyre::eyre!(
        "Schema changed after revert and reapply ({} difference(s))",
        errors.len()
    ))
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
