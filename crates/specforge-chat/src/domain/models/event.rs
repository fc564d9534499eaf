use super::CompletedExchange;

#[derive(Debug)]
pub enum Event {
    SpecResponse(CompletedExchange),
}
