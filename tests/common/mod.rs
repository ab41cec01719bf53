#![allow(dead_code)]

use sp800_rand::{
    DrbgError, EntropyError, EntropySource, EntropySourceProvider, GenerateError, Sp80090Drbg,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use zeroize::Zeroizing;

/// What a mock source returns on each fetch.
#[derive(Clone, Debug)]
pub enum Script {
    /// Pre-recorded blocks, in order. Running out is `EntropyError::Exhausted`.
    Recorded(Vec<Vec<u8>>),
    /// Fetch `i` (from zero) returns bytes `(i * block_len + j) & 0xff`.
    Counting { block_len: usize },
}

#[derive(Clone)]
pub struct MockProvider {
    script: Script,
    fail_on_call: Option<usize>,
    entropy_calls: Arc<AtomicUsize>,
    requested_bits: Arc<Mutex<Vec<u32>>>,
}

impl MockProvider {
    pub fn recorded(blocks: Vec<Vec<u8>>) -> Self {
        Self::new(Script::Recorded(blocks))
    }

    pub fn counting(block_len: usize) -> Self {
        Self::new(Script::Counting { block_len })
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            fail_on_call: None,
            entropy_calls: Arc::new(AtomicUsize::new(0)),
            requested_bits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every source fails its `call`-th fetch (counting from one).
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Fetches across every source this provider has handed out.
    pub fn entropy_calls(&self) -> usize {
        self.entropy_calls.load(Ordering::SeqCst)
    }

    /// Bit counts passed to `get`, one entry per source handed out.
    pub fn requested_bits(&self) -> Vec<u32> {
        self.requested_bits.lock().unwrap().clone()
    }
}

impl EntropySourceProvider for MockProvider {
    fn get(&self, bits_required: u32) -> Result<Box<dyn EntropySource>, EntropyError> {
        self.requested_bits.lock().unwrap().push(bits_required);
        Ok(Box::new(MockSource {
            script: self.script.clone(),
            fail_on_call: self.fail_on_call,
            pos: 0,
            bits: bits_required,
            entropy_calls: Arc::clone(&self.entropy_calls),
        }))
    }
}

struct MockSource {
    script: Script,
    fail_on_call: Option<usize>,
    pos: usize,
    bits: u32,
    entropy_calls: Arc<AtomicUsize>,
}

impl EntropySource for MockSource {
    fn is_prediction_resistant(&self) -> bool {
        true
    }

    fn get_entropy(&mut self) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
        let i = self.pos;
        self.pos += 1;
        self.entropy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(self.pos) {
            return Err(EntropyError::Source("mock entropy source failure".into()));
        }
        match &self.script {
            Script::Recorded(blocks) => blocks
                .get(i)
                .cloned()
                .map(Zeroizing::new)
                .ok_or(EntropyError::Exhausted),
            Script::Counting { block_len } => Ok(Zeroizing::new(
                (0..*block_len)
                    .map(|j| ((i * block_len + j) & 0xff) as u8)
                    .collect(),
            )),
        }
    }

    fn entropy_size(&self) -> u32 {
        self.bits
    }
}

/// Counters shared between a [`MockMechanism`] and the test that drives it.
#[derive(Clone, Default)]
pub struct MechanismLog {
    pub generates: Arc<AtomicUsize>,
    pub reseeds: Arc<AtomicUsize>,
}

impl MechanismLog {
    pub fn generates(&self) -> usize {
        self.generates.load(Ordering::SeqCst)
    }

    pub fn reseeds(&self) -> usize {
        self.reseeds.load(Ordering::SeqCst)
    }
}

/// A mechanism that counts requests against a fixed reseed interval and
/// fills output with the request number.
pub struct MockMechanism {
    pub log: MechanismLog,
    pub reseed_interval: u64,
    pub counter: u64,
    /// Keep signalling a reseed even right after one.
    pub stuck: bool,
    pub max_bytes_per_request: usize,
    pub last_additional_input: Arc<Mutex<Vec<u8>>>,
}

impl MockMechanism {
    pub fn new(reseed_interval: u64) -> Self {
        Self {
            log: MechanismLog::default(),
            reseed_interval,
            counter: 0,
            stuck: false,
            max_bytes_per_request: 1 << 16,
            last_additional_input: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Sp80090Drbg for MockMechanism {
    fn generate(
        &mut self,
        bytes: &mut [u8],
        _additional_input: &[u8],
        prediction_resistant: bool,
    ) -> Result<(), GenerateError> {
        if prediction_resistant {
            self.reseed(&[])?;
        }
        if self.stuck || self.counter >= self.reseed_interval {
            return Err(GenerateError::ReseedRequired);
        }
        self.counter += 1;
        let n = self.log.generates.fetch_add(1, Ordering::SeqCst) + 1;
        bytes.fill(n as u8);
        Ok(())
    }

    fn reseed(&mut self, additional_input: &[u8]) -> Result<(), DrbgError> {
        self.log.reseeds.fetch_add(1, Ordering::SeqCst);
        *self.last_additional_input.lock().unwrap() = additional_input.to_vec();
        self.counter = 0;
        Ok(())
    }

    fn block_size(&self) -> usize {
        128
    }

    fn security_strength(&self) -> u32 {
        128
    }

    fn max_bytes_per_request(&self) -> usize {
        self.max_bytes_per_request
    }
}
