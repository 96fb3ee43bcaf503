use core::net::{Ipv4Addr, SocketAddrV4};

use embedded_io::{Read, ReadReady, Write};

use super::{Datagram, Received, SocketHandle, State, MAX_PACKET_SIZE, MAX_RECEIVE_CHUNK};
use crate::client::Device;
use crate::command::ip_transport_layer::{
    responses::*, types::*, CloseSocket, CreateSocket, ReceiveFrom, SendTo,
};
use crate::config::PowerSaveMode;
use crate::error::Error;

impl<T> Device<T>
where
    T: Read + Write + ReadReady,
{
    /// Open the UDP socket on the configured local port.
    ///
    /// Only one socket exists at a time; asking again while it is open fails
    /// with [`Error::NotReady`] and leaves it open.
    pub fn create_socket(&mut self) -> Result<SocketHandle, Error> {
        if self.socket.is_open() {
            warn!("Socket already open");
            return Err(Error::NotReady);
        }

        let local_port = self.config.local_port;
        let CreateSocketResponse { socket } = self.send(&CreateSocket {
            socket_type: SocketType::Dgram,
            protocol: SocketProtocol::UDP,
            listen_port: local_port,
            receive_control: true,
        })?;

        debug!("Opened socket {} on port {}", socket, local_port);
        self.socket = State::Open {
            handle: socket,
            local_port,
        };
        Ok(socket)
    }

    pub fn is_socket_open(&self) -> bool {
        self.socket.is_open()
    }

    pub fn socket_state(&self) -> State {
        self.socket
    }

    /// Send one datagram. The release flag follows the power save mode.
    pub fn send_bytes(&mut self, ip: Ipv4Addr, port: u16, data: &[u8]) -> Result<(), Error> {
        let socket = self.socket.handle()?;
        if data.len() > MAX_PACKET_SIZE {
            return Err(Error::PayloadTooLarge);
        }

        let release = match self.power_save_mode {
            PowerSaveMode::SleepAfterSend => Some(ReleaseIndicator::AfterNextMessage),
            PowerSaveMode::SleepAfterResponse => Some(ReleaseIndicator::AfterNextReply),
            PowerSaveMode::AlwaysOn => None,
        };

        let SendToResponse { length, .. } = self.send(&SendTo {
            socket,
            remote: SocketAddrV4::new(ip, port),
            release,
            data,
        })?;

        if length != data.len() {
            warn!("Module accepted {} of {} bytes", length, data.len());
            return Err(Error::InvalidResponse);
        }
        trace!("Sent {} bytes to port {}", length, port);
        Ok(())
    }

    pub fn send_string(&mut self, ip: Ipv4Addr, port: u16, data: &str) -> Result<(), Error> {
        self.send_bytes(ip, port, data.as_bytes())
    }

    /// Read pending data into `buf`, without the sender.
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<Received, Error> {
        let Datagram {
            length, remaining, ..
        } = self.receive_from(buf)?;
        Ok(Received { length, remaining })
    }

    /// Read pending data into `buf`.
    ///
    /// At most [`MAX_RECEIVE_CHUNK`] bytes are fetched per call. Whatever is
    /// left of the datagram stays with the module and is reported in
    /// `remaining`. [`Error::NoData`] means nothing is pending.
    pub fn receive_from(&mut self, buf: &mut [u8]) -> Result<Datagram, Error> {
        let socket = self.socket.handle()?;
        if buf.is_empty() {
            return Err(Error::Overflow);
        }

        let SocketData {
            remote,
            data,
            remaining,
            ..
        } = self.send(&ReceiveFrom {
            socket,
            length: buf.len().min(MAX_RECEIVE_CHUNK),
        })?;

        let dst = buf.get_mut(..data.len()).ok_or(Error::Overflow)?;
        dst.copy_from_slice(&data);

        trace!("Received {} bytes from port {}", data.len(), remote.port());
        Ok(Datagram {
            remote,
            length: data.len(),
            remaining,
        })
    }

    /// Close the socket. Closing a closed socket is a no-op.
    ///
    /// The socket is considered closed afterwards even if the module
    /// rejected the command.
    pub fn close_socket(&mut self) -> Result<(), Error> {
        let State::Open { handle, .. } = core::mem::take(&mut self.socket) else {
            return Ok(());
        };
        debug!("Closing socket {}", handle);
        self.send(&CloseSocket { socket: handle }).map(|_| ())
    }
}
