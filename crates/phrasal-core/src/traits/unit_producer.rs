/// Splits raw text into the ordered units the aligner consumes.
pub trait IUnitProducer: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}
