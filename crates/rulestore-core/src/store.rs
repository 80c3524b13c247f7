//! SQL execution over the rule table.
//!
//! [`RuleStore`] owns a single synchronous connection. Multi-statement
//! operations run inside one `rusqlite` transaction; any error propagates
//! with `?`, dropping the transaction and rolling back, so a failed batch
//! leaves the table exactly as it was before the call.

use rusqlite::{Connection, ToSql};
use tracing::debug;

use rulestore_filter::{exact_match, window, Predicate, MAX_FIELDS};

use crate::codec;
use crate::config::StoreConfig;
use crate::error::Error;
use crate::rule::PolicyRule;

const COLUMNS: &str = "ptype, v0, v1, v2, v3, v4, v5";

/// Rule-table storage over one SQLite connection.
pub struct RuleStore {
    conn: Connection,
    table: String,
}

impl RuleStore {
    /// Open a store from configuration.
    ///
    /// File-backed databases are put in WAL mode; in-memory ones are left
    /// alone. The rule table itself is provisioned by the caller.
    pub fn open(config: &StoreConfig) -> Result<Self, Error> {
        let conn = match &config.path {
            Some(path) => {
                let conn = Connection::open(path)?;
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn
            }
            None => Connection::open_in_memory()?,
        };
        Ok(Self::with_connection(conn, config.table.clone()))
    }

    /// Wrap an already-opened connection.
    pub fn with_connection(conn: Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
        }
    }

    /// The rule table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Read every row in storage order.
    pub fn select_all(&self) -> Result<Vec<PolicyRule>, Error> {
        select_rules(&self.conn, &self.table, None)
    }

    /// Read the rows matching a predicate, in storage order.
    pub fn select_where(&self, pred: &Predicate) -> Result<Vec<PolicyRule>, Error> {
        select_rules(&self.conn, &self.table, Some(pred))
    }

    /// Insert a single rule.
    pub fn insert_one(&self, ptype: &str, values: &[String]) -> Result<(), Error> {
        insert_rule(&self.conn, &self.table, ptype, values)
    }

    /// Insert a batch of rules as one multi-row INSERT. Each tuple is
    /// right-padded with NULL to the full column width.
    pub fn insert_many(&self, ptype: &str, rules: &[Vec<String>]) -> Result<(), Error> {
        if rules.is_empty() {
            return Ok(());
        }
        let rows = vec!["(?, ?, ?, ?, ?, ?, ?)"; rules.len()].join(", ");
        let sql = format!("INSERT INTO {} ({COLUMNS}) VALUES {rows}", self.table);

        let encoded: Vec<[Option<&str>; MAX_FIELDS]> =
            rules.iter().map(|r| codec::encode(r)).collect();
        let mut params: Vec<&dyn ToSql> = Vec::with_capacity(rules.len() * (MAX_FIELDS + 1));
        for columns in &encoded {
            params.push(&ptype);
            for column in columns {
                params.push(column);
            }
        }

        self.conn.execute(&sql, params.as_slice())?;
        debug!(ptype, rows = rules.len(), "inserted rule batch");
        Ok(())
    }

    /// Delete the rows matching a predicate. Zero matched rows is success.
    pub fn delete_where(&self, pred: &Predicate) -> Result<(), Error> {
        let deleted = delete_rules(&self.conn, &self.table, pred)?;
        debug!(deleted, "deleted matching rules");
        Ok(())
    }

    /// Delete one exact-match row set per tuple, all inside a single
    /// transaction.
    pub fn delete_many(&mut self, ptype: &str, rules: &[Vec<String>]) -> Result<(), Error> {
        let tx = self.conn.transaction()?;
        for values in rules {
            let pred = exact_match(ptype, values);
            delete_rules(&tx, &self.table, &pred)?;
        }
        tx.commit()?;
        debug!(ptype, rows = rules.len(), "deleted rule batch");
        Ok(())
    }

    /// Update a single rule: SET the positions present in `new`, keyed by
    /// ptype plus every position present in `old`.
    pub fn update_one(
        &self,
        ptype: &str,
        old: &[String],
        new: &[String],
    ) -> Result<(), Error> {
        update_rule(&self.conn, &self.table, ptype, old, new)?;
        Ok(())
    }

    /// Update one rule per (old, new) pair inside a single transaction.
    /// Unpaired tails of either list are ignored.
    pub fn update_many(
        &mut self,
        ptype: &str,
        olds: &[Vec<String>],
        news: &[Vec<String>],
    ) -> Result<(), Error> {
        let tx = self.conn.transaction()?;
        for (old, new) in olds.iter().zip(news.iter()) {
            update_rule(&tx, &self.table, ptype, old, new)?;
        }
        tx.commit()?;
        debug!(ptype, rows = olds.len().min(news.len()), "updated rule batch");
        Ok(())
    }

    /// Replace the rows matching a field-index window with `new_rules`,
    /// returning the replaced tuples. Select, delete, and insert run inside
    /// one transaction.
    pub fn replace_where(
        &mut self,
        ptype: &str,
        new_rules: &[Vec<String>],
        field_index: usize,
        field_values: &[String],
    ) -> Result<Vec<Vec<String>>, Error> {
        let pred = window(ptype, field_index, field_values);
        let tx = self.conn.transaction()?;
        let old = select_rules(&tx, &self.table, Some(&pred))?;
        delete_rules(&tx, &self.table, &pred)?;
        for values in new_rules {
            insert_rule(&tx, &self.table, ptype, values)?;
        }
        tx.commit()?;
        debug!(
            ptype,
            replaced = old.len(),
            inserted = new_rules.len(),
            "replaced filtered rules"
        );
        Ok(old.into_iter().map(|rule| rule.values).collect())
    }
}

/// Owned named-parameter storage for a predicate's bindings.
struct BoundParams {
    names: Vec<String>,
    values: Vec<String>,
}

impl BoundParams {
    fn new(bindings: &[(String, String)]) -> Self {
        Self {
            names: bindings.iter().map(|(n, _)| format!(":{n}")).collect(),
            values: bindings.iter().map(|(_, v)| v.clone()).collect(),
        }
    }

    fn params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(|v| v as &dyn ToSql))
            .collect()
    }
}

fn row_to_rule(row: &rusqlite::Row<'_>) -> rusqlite::Result<PolicyRule> {
    let ptype: String = row.get(0)?;
    let mut columns = Vec::with_capacity(MAX_FIELDS);
    for i in 0..MAX_FIELDS {
        columns.push(row.get::<_, Option<String>>(i + 1)?);
    }
    Ok(PolicyRule {
        ptype,
        values: codec::decode(&columns),
    })
}

fn select_rules(
    conn: &Connection,
    table: &str,
    pred: Option<&Predicate>,
) -> Result<Vec<PolicyRule>, Error> {
    let sql = match pred {
        Some(p) => format!("SELECT {COLUMNS} FROM {table} WHERE {}", p.clause),
        None => format!("SELECT {COLUMNS} FROM {table}"),
    };
    let mut stmt = conn.prepare(&sql)?;
    let rules = match pred {
        Some(p) => {
            let bound = BoundParams::new(&p.bindings);
            stmt.query_map(bound.params().as_slice(), row_to_rule)?
                .collect::<rusqlite::Result<Vec<_>>>()?
        }
        None => stmt
            .query_map([], row_to_rule)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
    };
    Ok(rules)
}

fn insert_rule(
    conn: &Connection,
    table: &str,
    ptype: &str,
    values: &[String],
) -> Result<(), Error> {
    let sql = format!("INSERT INTO {table} ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)");
    let columns = codec::encode(values);
    conn.execute(
        &sql,
        rusqlite::params![
            ptype, columns[0], columns[1], columns[2], columns[3], columns[4], columns[5]
        ],
    )?;
    Ok(())
}

fn delete_rules(conn: &Connection, table: &str, pred: &Predicate) -> Result<usize, Error> {
    let sql = format!("DELETE FROM {table} WHERE {}", pred.clause);
    let bound = BoundParams::new(&pred.bindings);
    Ok(conn.execute(&sql, bound.params().as_slice())?)
}

fn update_rule(
    conn: &Connection,
    table: &str,
    ptype: &str,
    old: &[String],
    new: &[String],
) -> Result<usize, Error> {
    if new.is_empty() {
        return Ok(0);
    }
    let assignments: Vec<String> = (0..new.len().min(MAX_FIELDS))
        .map(|i| format!("v{i} = :new_v{i}"))
        .collect();
    let pred = exact_match(ptype, old);
    let sql = format!(
        "UPDATE {table} SET {} WHERE {}",
        assignments.join(", "),
        pred.clause
    );

    let mut bindings: Vec<(String, String)> = new
        .iter()
        .take(MAX_FIELDS)
        .enumerate()
        .map(|(i, v)| (format!("new_v{i}"), v.clone()))
        .collect();
    bindings.extend(pred.bindings.iter().cloned());

    let bound = BoundParams::new(&bindings);
    Ok(conn.execute(&sql, bound.params().as_slice())?)
}
