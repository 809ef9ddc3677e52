use biometrics::{Collector, Counter, Moments, Sensor};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("alghaz.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("alghaz.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("alghaz.client.request_duration_seconds");

pub(crate) static CHAT_SUBMITS: Counter = Counter::new("alghaz.chat.submits");
pub(crate) static CHAT_ERROR_TURNS: Counter = Counter::new("alghaz.chat.error_turns");
pub(crate) static CHAT_EVICTIONS: Counter = Counter::new("alghaz.chat.evictions");

pub(crate) static RIDDLES_PICKED: Counter = Counter::new("alghaz.riddle.picked");
pub(crate) static ANSWERS_CORRECT: Counter = Counter::new("alghaz.riddle.answers_correct");
pub(crate) static ANSWERS_WRONG: Counter = Counter::new("alghaz.riddle.answers_wrong");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: &Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_SUBMITS);
    collector.register_counter(&CHAT_ERROR_TURNS);
    collector.register_counter(&CHAT_EVICTIONS);

    collector.register_counter(&RIDDLES_PICKED);
    collector.register_counter(&ANSWERS_CORRECT);
    collector.register_counter(&ANSWERS_WRONG);
}

/// Point-in-time values of the request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Requests sent to the completion endpoint.
    pub requests: u64,
    /// Requests that ended in an error.
    pub request_errors: u64,
    /// Riddles handed out.
    pub riddles_picked: u64,
    /// Correct answers.
    pub answers_correct: u64,
    /// Wrong answers.
    pub answers_wrong: u64,
}

/// Reads the current counter values.
pub fn snapshot() -> CounterSnapshot {
    CounterSnapshot {
        requests: CLIENT_REQUESTS.read(),
        request_errors: CLIENT_REQUEST_ERRORS.read(),
        riddles_picked: RIDDLES_PICKED.read(),
        answers_correct: ANSWERS_CORRECT.read(),
        answers_wrong: ANSWERS_WRONG.read(),
    }
}
