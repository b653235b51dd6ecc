//! Integration tests for [`StreamChannel`] over real loopback TCP sockets.
//!
//! These exercise the framing assumption the link depends on: one payload
//! written by one side in a single write is read back as one message.

use tokio::net::{TcpListener, TcpStream};
use v2v_core::{ByteChannel, StreamChannel, TransportError};

async fn connected_pair() -> (StreamChannel<TcpStream>, StreamChannel<TcpStream>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (client, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
    (
        StreamChannel::new("client", client.expect("connect")),
        StreamChannel::new("server", accepted.expect("accept").0),
    )
}

#[tokio::test]
async fn test_request_byte_then_payload_round_trip_over_tcp() {
    // Arrange
    let (mut client, mut server) = connected_pair().await;

    // Act – the controller side sends one request byte, the relay answers
    client.write_byte(b'R').await.unwrap();
    let request = server.read_byte().await.unwrap();
    server.write_all(b"PONG").await.unwrap();
    let response = client.read_message().await.unwrap();

    // Assert
    assert_eq!(request, b'R');
    assert_eq!(response, b"PONG");
}

#[tokio::test]
async fn test_peer_disconnect_surfaces_as_closed() {
    // Arrange
    let (mut client, server) = connected_pair().await;

    // Act
    drop(server);
    let result = client.read_byte().await;

    // Assert
    assert!(matches!(result, Err(TransportError::Closed { .. })));
}
