use super::PendingExchange;

#[derive(Debug, Clone)]
pub enum Action {
    SpecRequest(PendingExchange),
}
