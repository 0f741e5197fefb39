use actix::prelude::*;

pub mod catalog;

#[derive(Message, Debug)]
#[rtype(result = "bool")]
pub struct HealthCommand;
