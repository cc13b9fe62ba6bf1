//! Line protocol for the driver binary
//!
//! One command per line, whitespace separated:
//!
//! ```text
//! ADD <id> <BUY|SELL> <GTC|GFD|FAK|FOK> <price> <qty>
//! ADD <id> <BUY|SELL> MKT <qty>
//! MODIFY <id> <BUY|SELL> <price> <qty>
//! CANCEL <id>
//! SIZE
//! DEPTH
//! ```

use std::num::ParseIntError;
use thiserror::Error;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderModify, OrderType, Side};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown side: {0}")]
    UnknownSide(String),
    #[error("unknown order type: {0}")]
    UnknownOrderType(String),
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("wrong number of arguments for {0}")]
    WrongArity(&'static str),
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Add(Order),
    Cancel(OrderId),
    Modify(OrderModify),
    Size,
    Depth,
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Err(ParseError::Empty);
    };
    let args: Vec<&str> = parts.collect();
    match command.to_ascii_uppercase().as_str() {
        "ADD" => parse_add(&args),
        "CANCEL" => {
            let [id] = args[..] else {
                return Err(ParseError::WrongArity("CANCEL"));
            };
            Ok(Command::Cancel(OrderId::new(id.parse()?)))
        }
        "MODIFY" => {
            let [id, side, price, qty] = args[..] else {
                return Err(ParseError::WrongArity("MODIFY"));
            };
            Ok(Command::Modify(OrderModify::new(
                OrderId::new(id.parse()?),
                parse_side(side)?,
                Price::new(price.parse()?),
                Quantity::new(qty.parse()?),
            )))
        }
        "SIZE" => {
            if !args.is_empty() {
                return Err(ParseError::WrongArity("SIZE"));
            }
            Ok(Command::Size)
        }
        "DEPTH" => {
            if !args.is_empty() {
                return Err(ParseError::WrongArity("DEPTH"));
            }
            Ok(Command::Depth)
        }
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_add(args: &[&str]) -> Result<Command, ParseError> {
    match *args {
        // market orders carry no price
        [id, side, kind, qty] => {
            if parse_order_type(kind)? != OrderType::Market {
                return Err(ParseError::WrongArity("ADD"));
            }
            Ok(Command::Add(Order::market(
                OrderId::new(id.parse()?),
                parse_side(side)?,
                Quantity::new(qty.parse()?),
            )))
        }
        [id, side, kind, price, qty] => {
            let order_type = parse_order_type(kind)?;
            if order_type == OrderType::Market {
                return Err(ParseError::WrongArity("ADD"));
            }
            Ok(Command::Add(Order::new(
                order_type,
                OrderId::new(id.parse()?),
                parse_side(side)?,
                Price::new(price.parse()?),
                Quantity::new(qty.parse()?),
            )))
        }
        _ => Err(ParseError::WrongArity("ADD")),
    }
}

fn parse_side(token: &str) -> Result<Side, ParseError> {
    match token.to_ascii_uppercase().as_str() {
        "BUY" | "B" => Ok(Side::Buy),
        "SELL" | "S" => Ok(Side::Sell),
        other => Err(ParseError::UnknownSide(other.to_string())),
    }
}

fn parse_order_type(token: &str) -> Result<OrderType, ParseError> {
    match token.to_ascii_uppercase().as_str() {
        "GTC" => Ok(OrderType::GoodTillCancel),
        "GFD" => Ok(OrderType::GoodForDay),
        "FAK" | "IOC" => Ok(OrderType::FillAndKill),
        "FOK" => Ok(OrderType::FillOrKill),
        "MKT" | "MARKET" => Ok(OrderType::Market),
        other => Err(ParseError::UnknownOrderType(other.to_string())),
    }
}
