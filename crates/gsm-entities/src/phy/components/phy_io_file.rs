use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;

use core::fmt;
use crossbeam_channel::{unbounded, Sender};

/// Record header: timeslot, frame number (big endian), burst length (big endian)
pub const BURST_RECORD_HDR_LEN: usize = 1 + 4 + 2;

#[derive(Debug, Clone)]
pub enum FileWriteMsg {
    WriteBurst { tn: u8, fn_num: u32, bits: Vec<u8> },
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhyIoFileMode {
    Write,
    Read,
}

#[derive(Debug)]
pub enum PhyIoError {
    Io(String),
    Eof,
    /// Operation does not match the mode the file was opened in
    WrongMode(PhyIoFileMode),
}

impl fmt::Display for PhyIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhyIoError::Io(e) => write!(f, "I/O error: {}", e),
            PhyIoError::Eof => write!(f, "end of file"),
            PhyIoError::WrongMode(mode) => write!(f, "file opened in {:?} mode", mode),
        }
    }
}

impl std::error::Error for PhyIoError {}

impl From<io::Error> for PhyIoError {
    fn from(err: io::Error) -> Self {
        PhyIoError::Io(err.to_string())
    }
}

/// One recorded downlink burst
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstRecord {
    pub tn: u8,
    pub fn_num: u32,
    pub bits: Vec<u8>,
}

/// Burst capture file, one header plus the unpacked bits per burst
pub struct PhyIoFile {
    file: File,
    mode: PhyIoFileMode,
}

impl PhyIoFile {
    pub fn new<P: AsRef<Path>>(filename: P, mode: PhyIoFileMode) -> io::Result<Self> {
        let file = match mode {
            PhyIoFileMode::Read => OpenOptions::new().read(true).open(&filename)?,
            PhyIoFileMode::Write => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&filename)?,
        };
        Ok(Self { file, mode })
    }

    pub fn write_burst(&mut self, tn: u8, fn_num: u32, bits: &[u8]) -> Result<(), PhyIoError> {
        if self.mode != PhyIoFileMode::Write {
            return Err(PhyIoError::WrongMode(self.mode));
        }
        let len = u16::try_from(bits.len()).map_err(|_| PhyIoError::Io(format!("burst of {} bits", bits.len())))?;
        self.file.write_all(&[tn])?;
        self.file.write_all(&fn_num.to_be_bytes())?;
        self.file.write_all(&len.to_be_bytes())?;
        self.file.write_all(bits)?;
        Ok(())
    }

    /// Reads the next record. Eof if the file ends on a record boundary
    pub fn read_burst(&mut self) -> Result<BurstRecord, PhyIoError> {
        if self.mode != PhyIoFileMode::Read {
            return Err(PhyIoError::WrongMode(self.mode));
        }
        let mut hdr = [0u8; BURST_RECORD_HDR_LEN];
        let n = self.file.read(&mut hdr)?;
        if n == 0 {
            return Err(PhyIoError::Eof);
        }
        self.file.read_exact(&mut hdr[n..])?;

        let tn = hdr[0];
        let fn_num = u32::from_be_bytes([hdr[1], hdr[2], hdr[3], hdr[4]]);
        let len = u16::from_be_bytes([hdr[5], hdr[6]]) as usize;
        let mut bits = vec![0u8; len];
        self.file.read_exact(&mut bits)?;
        Ok(BurstRecord { tn, fn_num, bits })
    }

    pub fn flush(&mut self) -> Result<(), PhyIoError> {
        self.file.flush()?;
        Ok(())
    }

    /// Spawns a thread that owns the file and writes whatever is sent to the returned channel
    pub fn create_async_writer<P: AsRef<Path>>(filename: P, thread_name: String) -> io::Result<Sender<FileWriteMsg>> {
        let mut file = PhyIoFile::new(filename, PhyIoFileMode::Write)?;
        let (sender, receiver) = unbounded::<FileWriteMsg>();

        thread::Builder::new().name(thread_name).spawn(move || {
            while let Ok(msg) = receiver.recv() {
                match msg {
                    FileWriteMsg::WriteBurst { tn, fn_num, bits } => {
                        if let Err(e) = file.write_burst(tn, fn_num, &bits) {
                            tracing::warn!("burst capture stopped: {}", e);
                            break;
                        }
                    }
                    FileWriteMsg::Shutdown => break,
                }
            }
            let _ = file.flush();
        })?;

        Ok(sender)
    }
}
