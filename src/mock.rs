//! Mock I2C implementation for testing

use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation};
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification, serves pre-programmed
/// response bytes for read operations, and can inject bus errors to
/// exercise failure paths.
#[derive(Debug, Default)]
pub struct MockI2c {
    transactions: Vec<I2cTransaction>,
    read_data: Vec<u8>,
    fail_count: usize,
}

impl MockI2c {
    /// Create a new mock I2C bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Queue data to return for subsequent read operations
    pub fn queue_read_data(&mut self, data: &[u8]) {
        self.read_data.extend_from_slice(data);
    }

    /// Fail the next `count` transactions with a bus error
    pub fn inject_errors(&mut self, count: usize) {
        self.fail_count = count;
    }

    fn fill_read(&mut self, buffer: &mut [u8]) {
        let to_read = core::cmp::min(buffer.len(), self.read_data.len());
        buffer[..to_read].copy_from_slice(&self.read_data[..to_read]);
        self.read_data.drain(..to_read);
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_count > 0 {
            self.fail_count -= 1;
            return Err(ErrorKind::Other);
        }

        match operations {
            [Operation::Write(data)] => {
                self.transactions.push(I2cTransaction::Write {
                    addr: address,
                    data: data.to_vec(),
                });
            }
            [Operation::Read(buffer)] => {
                self.transactions.push(I2cTransaction::Read {
                    addr: address,
                    len: buffer.len(),
                });
                self.fill_read(buffer);
            }
            // A write followed by a read is a combined register-read
            // transaction
            [Operation::Write(data), Operation::Read(buffer)] => {
                self.transactions.push(I2cTransaction::WriteRead {
                    addr: address,
                    write_data: data.to_vec(),
                    read_len: buffer.len(),
                });
                self.fill_read(buffer);
            }
            // Record anything else operation by operation
            ops => {
                for op in ops.iter_mut() {
                    match op {
                        Operation::Write(data) => {
                            self.transactions.push(I2cTransaction::Write {
                                addr: address,
                                data: data.to_vec(),
                            });
                        }
                        Operation::Read(buffer) => {
                            self.transactions.push(I2cTransaction::Read {
                                addr: address,
                                len: buffer.len(),
                            });
                            self.fill_read(buffer);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_i2c_write() {
        let mut i2c = MockI2c::new();
        i2c.write(0x1D, &[0x2A, 0x01]).await.unwrap();

        let transactions = i2c.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(
            transactions[0],
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![0x2A, 0x01]
            }
        );
    }

    #[tokio::test]
    async fn test_mock_i2c_read() {
        let mut i2c = MockI2c::new();
        i2c.queue_read_data(&[0xAA, 0xBB, 0xCC]);

        let mut buffer = [0u8; 3];
        i2c.read(0x1D, &mut buffer).await.unwrap();

        assert_eq!(buffer, [0xAA, 0xBB, 0xCC]);

        let transactions = i2c.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0], I2cTransaction::Read { addr: 0x1D, len: 3 });
    }

    #[tokio::test]
    async fn test_mock_i2c_write_read() {
        let mut i2c = MockI2c::new();
        i2c.queue_read_data(&[0x1A]);

        let mut buffer = [0u8; 1];
        i2c.write_read(0x1D, &[0x0D], &mut buffer).await.unwrap();

        assert_eq!(buffer, [0x1A]);

        let transactions = i2c.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(
            transactions[0],
            I2cTransaction::WriteRead {
                addr: 0x1D,
                write_data: vec![0x0D],
                read_len: 1
            }
        );
    }

    #[tokio::test]
    async fn test_mock_i2c_short_read_leaves_buffer() {
        let mut i2c = MockI2c::new();
        i2c.queue_read_data(&[0x12]);

        let mut buffer = [0xFFu8; 3];
        i2c.read(0x1D, &mut buffer).await.unwrap();

        // Only queued bytes are served; the rest of the buffer is untouched
        assert_eq!(buffer, [0x12, 0xFF, 0xFF]);
    }

    #[tokio::test]
    async fn test_mock_i2c_error_injection() {
        let mut i2c = MockI2c::new();
        i2c.inject_errors(2);

        let mut buffer = [0u8; 1];
        assert!(i2c.write_read(0x1D, &[0x0D], &mut buffer).await.is_err());
        assert!(i2c.write(0x1D, &[0x2A, 0x01]).await.is_err());
        assert!(i2c.write(0x1D, &[0x2A, 0x01]).await.is_ok());

        // Failed transactions are not recorded
        assert_eq!(i2c.transactions().len(), 1);
    }
}
