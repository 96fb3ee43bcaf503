use core::net::{SocketAddr, SocketAddrV4};

use embedded_io::{Read, ReadReady, Write};
use embedded_nal::UdpClientStack;

use crate::client::Device;
use crate::error::Error;

/// Handle handed out through [`UdpClientStack`]. It only remembers the peer,
/// the socket itself lives in the [`Device`].
#[derive(Debug, Default)]
pub struct UdpSocket {
    remote: Option<SocketAddrV4>,
}

impl UdpSocket {
    pub fn remote(&self) -> Option<SocketAddrV4> {
        self.remote
    }
}

impl<T> UdpClientStack for Device<T>
where
    T: Read + Write + ReadReady,
{
    type UdpSocket = UdpSocket;
    type Error = Error;

    fn socket(&mut self) -> Result<Self::UdpSocket, Self::Error> {
        self.create_socket()?;
        Ok(UdpSocket::default())
    }

    /// UDP is connectionless, this only records the peer. The module has no
    /// IPv6 support.
    fn connect(&mut self, socket: &mut Self::UdpSocket, remote: SocketAddr) -> Result<(), Self::Error> {
        match remote {
            SocketAddr::V4(remote) => {
                socket.remote = Some(remote);
                Ok(())
            }
            SocketAddr::V6(_) => Err(Error::Unsupported),
        }
    }

    fn send(&mut self, socket: &mut Self::UdpSocket, buffer: &[u8]) -> nb::Result<(), Self::Error> {
        let remote = socket.remote.ok_or(Error::NotReady)?;
        self.send_bytes(*remote.ip(), remote.port(), buffer)?;
        Ok(())
    }

    fn receive(
        &mut self,
        _socket: &mut Self::UdpSocket,
        buffer: &mut [u8],
    ) -> nb::Result<(usize, SocketAddr), Self::Error> {
        match self.receive_from(buffer) {
            Ok(datagram) => Ok((datagram.length, SocketAddr::V4(datagram.remote))),
            Err(Error::NoData) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn close(&mut self, _socket: Self::UdpSocket) -> Result<(), Self::Error> {
        self.close_socket()
    }
}

#[cfg(test)]
mod tests {
    use core::net::{Ipv4Addr, Ipv6Addr, SocketAddrV6};

    use super::*;
    use crate::test_helpers::{device, MockSerial, OK};

    const REMOTE: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(172, 16, 15, 14), 1234);

    #[test]
    fn udp_client_round_trip() {
        let serial = MockSerial::new()
            .expect("AT+NSOCR=\"DGRAM\",17,1234,1", "\r\n0\r\n\r\nOK\r\n")
            .expect("AT+NSOSTF=0,\"172.16.15.14\",1234,0x200,3,\"486921\"", "\r\n0,3\r\n\r\nOK\r\n")
            .expect("AT+NSORF=0,100", OK)
            .expect("AT+NSORF=0,100", "\r\n0,\"172.16.15.14\",1234,2,\"4F4B\",0\r\n\r\nOK\r\n")
            .expect("AT+NSOCL=0", OK);
        let mut dev = device(serial.clone());

        let mut socket = UdpClientStack::socket(&mut dev).unwrap();
        UdpClientStack::connect(&mut dev, &mut socket, SocketAddr::V4(REMOTE)).unwrap();
        assert_eq!(socket.remote(), Some(REMOTE));
        UdpClientStack::send(&mut dev, &mut socket, b"Hi!").unwrap();

        let mut buf = [0u8; 64];
        assert_eq!(
            UdpClientStack::receive(&mut dev, &mut socket, &mut buf),
            Err(nb::Error::WouldBlock)
        );
        assert_eq!(
            UdpClientStack::receive(&mut dev, &mut socket, &mut buf),
            Ok((2, SocketAddr::V4(REMOTE)))
        );
        assert_eq!(&buf[..2], b"OK");

        UdpClientStack::close(&mut dev, socket).unwrap();
        assert!(!dev.is_socket_open());
        assert!(serial.is_done());
    }

    #[test]
    fn send_without_peer() {
        let serial = MockSerial::new().expect("AT+NSOCR=\"DGRAM\",17,1234,1", "\r\n0\r\n\r\nOK\r\n");
        let mut dev = device(serial);

        let mut socket = UdpClientStack::socket(&mut dev).unwrap();
        assert_eq!(
            UdpClientStack::send(&mut dev, &mut socket, b"Hi!"),
            Err(nb::Error::Other(Error::NotReady))
        );
    }

    #[test]
    fn ipv6_is_unsupported() {
        let mut dev = device(MockSerial::new());
        let mut socket = UdpSocket::default();
        let remote = SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 1234, 0, 0));

        assert_eq!(
            UdpClientStack::connect(&mut dev, &mut socket, remote),
            Err(Error::Unsupported)
        );
    }
}
