//! Command encoding, the client half of the protocol.
//!
//! Requests are always flat arrays of blob strings, so the writer side of the
//! codec is much simpler than the reader.

use bytes::{BufMut, Bytes, BytesMut};

/// A single command: its name followed by raw, already-serialized arguments.
///
/// The operation methods build these from typed arguments; [`Command`] itself
/// never inspects the bytes it carries.
#[derive(Debug, Clone)]
pub struct Command {
    args: Vec<Bytes>,
}

impl Command {
    /// Starts a command with the given name.
    pub fn new(name: &'static str) -> Self {
        Command {
            args: vec![Bytes::from_static(name.as_bytes())],
        }
    }

    /// Starts a command whose name is only known at runtime.
    pub fn named(name: &str) -> Self {
        Command {
            args: vec![Bytes::copy_from_slice(name.as_bytes())],
        }
    }

    /// Appends a raw byte argument.
    pub fn arg(&mut self, arg: Bytes) -> &mut Self {
        self.args.push(arg);
        self
    }

    /// Appends a borrowed byte argument, copying it.
    pub fn arg_bytes(&mut self, arg: &[u8]) -> &mut Self {
        self.args.push(Bytes::copy_from_slice(arg));
        self
    }

    /// Appends a string argument, copying it.
    pub fn arg_str(&mut self, arg: &str) -> &mut Self {
        self.arg_bytes(arg.as_bytes())
    }

    /// Appends a static keyword argument like `MATCH` or `NX`.
    pub fn arg_static(&mut self, arg: &'static str) -> &mut Self {
        self.args.push(Bytes::from_static(arg.as_bytes()));
        self
    }

    /// Appends a signed integer argument in its decimal form.
    pub fn arg_int(&mut self, arg: i64) -> &mut Self {
        let mut buf = itoa::Buffer::new();
        self.arg_bytes(buf.format(arg).as_bytes())
    }

    /// Appends an unsigned integer argument in its decimal form.
    pub fn arg_uint(&mut self, arg: u64) -> &mut Self {
        let mut buf = itoa::Buffer::new();
        self.arg_bytes(buf.format(arg).as_bytes())
    }

    /// Appends a double argument in its shortest round-trippable form.
    pub fn arg_double(&mut self, arg: f64) -> &mut Self {
        let mut buf = ryu::Buffer::new();
        self.arg_bytes(buf.format(arg).as_bytes())
    }

    /// The command name.
    pub fn name(&self) -> &[u8] {
        &self.args[0]
    }

    /// Writes the command as a RESP array of blob strings.
    pub fn encode(&self, dst: &mut BytesMut) {
        let mut nbuf = itoa::Buffer::new();

        dst.put_u8(b'*');
        dst.put_slice(nbuf.format(self.args.len()).as_bytes());
        dst.put_slice(b"\r\n");
        for arg in &self.args {
            dst.put_u8(b'$');
            dst.put_slice(nbuf.format(arg.len()).as_bytes());
            dst.put_slice(b"\r\n");
            dst.put_slice(arg);
            dst.put_slice(b"\r\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(cmd: &Command) -> Vec<u8> {
        let mut buf = BytesMut::new();
        cmd.encode(&mut buf);
        buf.to_vec()
    }

    #[test]
    fn simple_set() {
        let mut cmd = Command::new("SET");
        cmd.arg_str("greeting").arg_str("Hello");
        assert_eq!(
            b"*3\r\n$3\r\nSET\r\n$8\r\ngreeting\r\n$5\r\nHello\r\n".as_ref(),
            encoded(&cmd),
        );
    }

    #[test]
    fn numeric_arguments() {
        let mut cmd = Command::new("ZADD");
        cmd.arg_str("board").arg_double(1.5).arg_int(-3);
        assert_eq!(
            b"*4\r\n$4\r\nZADD\r\n$5\r\nboard\r\n$3\r\n1.5\r\n$2\r\n-3\r\n".as_ref(),
            encoded(&cmd),
        );
    }

    #[test]
    fn binary_safe_arguments() {
        let mut cmd = Command::new("SET");
        cmd.arg_str("raw").arg(Bytes::from_static(b"\x00\xffbytes\r\n"));
        assert_eq!(
            b"*3\r\n$3\r\nSET\r\n$3\r\nraw\r\n$9\r\n\x00\xffbytes\r\n\r\n".as_ref(),
            encoded(&cmd),
        );
    }
}
