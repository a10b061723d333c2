// driftwatch-core/src/domain/sql/external.rs
//
// Parses the one piece of DDL the engine does not understand natively:
//
//     CREATE EXTERNAL DATABASE <name>
//       FROM <engine>
//       OPTIONS (
//         account = '...',
//         username = '...',
//         password = '...',
//         database = '...',
//         warehouse = '...',
//         role = '...',
//       );
//
// Every other statement is passed through to the engine verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlparser::dialect::GenericDialect;
use sqlparser::keywords::Keyword;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::Token;
use validator::Validate;

use crate::domain::error::DomainError;

/// Declarative option set naming a remote warehouse-style source.
/// Credentials are carried and validated, never logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WarehouseOptions {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub account: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub database: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub warehouse: String,
    pub role: Option<String>,
}

impl WarehouseOptions {
    fn from_map(mut options: HashMap<String, String>) -> Result<Self, DomainError> {
        let mut take = |key: &str| -> Result<String, DomainError> {
            options
                .remove(key)
                .ok_or_else(|| DomainError::MissingOption(key.to_string()))
        };

        let parsed = Self {
            account: take("account")?,
            username: take("username")?,
            password: take("password")?,
            database: take("database")?,
            warehouse: take("warehouse")?,
            role: options.remove("role"),
        };
        // Remaining keys are tolerated: remote engines accept more knobs
        // than we need to understand.

        parsed
            .validate()
            .map_err(|e| DomainError::InvalidOptions(e.to_string()))?;
        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDatabaseDdl {
    /// Name the database is registered under (the catalog prefix in queries).
    pub name: String,
    /// Remote engine flavor (e.g. "snowflake"). Recorded, not interpreted.
    pub engine: String,
    pub options: WarehouseOptions,
}

impl ExternalDatabaseDdl {
    /// Returns `Ok(Some(..))` when the statement is a CREATE EXTERNAL
    /// DATABASE, `Ok(None)` for any other statement (which the caller sends
    /// to the engine untouched), `Err` when it IS our DDL but malformed.
    pub fn parse(sql: &str) -> Result<Option<Self>, DomainError> {
        // Engine dialects tokenize things the generic tokenizer does not;
        // only statements opening with our DDL are ours to reject.
        if !Self::leads_with_ddl_keywords(sql) {
            return Ok(None);
        }

        let dialect = GenericDialect {};
        let mut parser = Parser::new(&dialect)
            .try_with_sql(sql)
            .map_err(|e| DomainError::SqlParse(e.to_string()))?;

        if !parser.parse_keywords(&[Keyword::CREATE, Keyword::EXTERNAL, Keyword::DATABASE]) {
            return Ok(None);
        }

        let name = parser
            .parse_identifier()
            .map_err(|e| DomainError::SqlParse(e.to_string()))?;

        parser
            .expect_keyword(Keyword::FROM)
            .map_err(|e| DomainError::SqlParse(e.to_string()))?;
        let engine = parser
            .parse_identifier()
            .map_err(|e| DomainError::SqlParse(e.to_string()))?;

        parser
            .expect_keyword(Keyword::OPTIONS)
            .map_err(|e| DomainError::SqlParse(e.to_string()))?;
        let options = Self::parse_options(&mut parser)?;

        // Optional trailing ';'
        parser.consume_token(&Token::SemiColon);
        if parser.peek_token().token != Token::EOF {
            return Err(DomainError::SqlParse(format!(
                "unexpected trailing tokens after OPTIONS: {}",
                parser.peek_token().token
            )));
        }

        Ok(Some(Self {
            name: name.value,
            engine: engine.value.to_lowercase(),
            options: WarehouseOptions::from_map(options)?,
        }))
    }

    fn leads_with_ddl_keywords(sql: &str) -> bool {
        let mut words = sql.split_whitespace();
        ["CREATE", "EXTERNAL", "DATABASE"]
            .iter()
            .all(|kw| words.next().is_some_and(|w| w.eq_ignore_ascii_case(kw)))
    }

    fn parse_options(parser: &mut Parser) -> Result<HashMap<String, String>, DomainError> {
        parser
            .expect_token(&Token::LParen)
            .map_err(|e| DomainError::SqlParse(e.to_string()))?;

        let mut options = HashMap::new();
        loop {
            // Handles both the empty list and a trailing comma before ')'
            if parser.consume_token(&Token::RParen) {
                break;
            }
            let key = parser
                .parse_identifier()
                .map_err(|e| DomainError::SqlParse(e.to_string()))?;
            parser
                .expect_token(&Token::Eq)
                .map_err(|e| DomainError::SqlParse(e.to_string()))?;
            let value = parser
                .parse_literal_string()
                .map_err(|e| DomainError::SqlParse(e.to_string()))?;

            options.insert(key.value.to_lowercase(), value);

            if !parser.consume_token(&Token::Comma) {
                parser
                    .expect_token(&Token::RParen)
                    .map_err(|e| DomainError::SqlParse(e.to_string()))?;
                break;
            }
        }
        Ok(options)
    }
}
