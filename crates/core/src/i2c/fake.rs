use fxhash::FxHashMap;
use nix::errno::Errno;
use super::{I2cAdapter, Msg, MsgFlags};

/// A simulated gauge answering command/read transactions from canned records.
pub struct FakeGauge {
    addr: u16,
    records: FxHashMap<u8, Vec<u8>>,
    failure: Option<Errno>,
    completed: Option<usize>,
    transfers: usize,
    last_command: Option<u8>,
    last_flags: Vec<MsgFlags>,
}

impl FakeGauge {
    pub fn new(addr: u16) -> FakeGauge {
        FakeGauge {
            addr,
            records: FxHashMap::default(),
            failure: None,
            completed: None,
            transfers: 0,
            last_command: None,
            last_flags: Vec::new(),
        }
    }

    pub fn with_record(mut self, cmd: u8, bytes: &[u8]) -> FakeGauge {
        self.set_record(cmd, bytes);
        self
    }

    pub fn set_record(&mut self, cmd: u8, bytes: &[u8]) {
        self.records.insert(cmd, bytes.to_vec());
    }

    pub fn fail_with(&mut self, errno: Errno) {
        self.failure = Some(errno);
    }

    /// Only the first *count* messages of each transfer will go through.
    pub fn complete_only(&mut self, count: usize) {
        self.completed = Some(count);
    }

    pub fn transfers(&self) -> usize {
        self.transfers
    }

    pub fn last_command(&self) -> Option<u8> {
        self.last_command
    }

    pub fn last_flags(&self) -> Vec<MsgFlags> {
        self.last_flags.clone()
    }
}

impl I2cAdapter for FakeGauge {
    fn transfer(&mut self, msgs: &mut [Msg]) -> Result<usize, nix::Error> {
        self.transfers += 1;
        self.last_flags = msgs.iter().map(|msg| msg.flags).collect();

        if let Some(errno) = self.failure {
            return Err(errno);
        }

        let count = self.completed.unwrap_or(msgs.len()).min(msgs.len());
        let mut command = None;

        for msg in msgs.iter_mut().take(count) {
            if msg.addr != self.addr {
                return Err(Errno::ENXIO);
            }
            if msg.flags.contains(MsgFlags::RD) {
                let cmd = command.ok_or(Errno::EIO)?;
                let record = self.records.get(&cmd).ok_or(Errno::ENXIO)?;
                let n = record.len().min(msg.buf.len());
                msg.buf[..n].copy_from_slice(&record[..n]);
                // Reading past the end of a record yields the idle bus level.
                msg.buf[n..].fill(0xff);
            } else {
                command = msg.buf.first().copied();
                self.last_command = command;
            }
        }

        Ok(count)
    }
}
