use framelink::protocol::{
    Action, CHECKSUM_OFFSET, Dispatcher, END_OFFSET, Error, LENGTH_OFFSET, MAX_PAYLOAD,
    PACKET_SIZE, PAYLOAD_OFFSET, Packet, RESERVED_OFFSET, START_OFFSET, binary_to_text,
    bounded_copy, build_packet, decode, dispatch, encode, extract_command, is_valid_text_frame,
    parse_packet, render_packet, text_to_binary,
};

/// Deterministic payload generator so failures are reproducible.
#[derive(Default)]
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        const A: u64 = 6364136223846793005;
        const C: u64 = 1442695040888963407;
        self.0 = self.0.wrapping_mul(A).wrapping_add(C);
        self.0
    }

    fn payload(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| (self.next() >> 56) as u8).collect()
    }
}

#[test]
fn every_payload_length_roundtrips() {
    let mut rng = Lcg(7);
    for len in 0..=MAX_PAYLOAD {
        let payload = rng.payload(len);
        let packet = build_packet(&payload).unwrap();

        assert_eq!(parse_packet(&packet).unwrap(), payload.as_slice());

        let wire = encode(&packet);
        assert_eq!(wire.len(), PACKET_SIZE);
        assert_eq!(decode(&wire).unwrap().payload(), payload.as_slice());
    }
}

#[test]
fn every_single_bit_flip_in_payload_is_detected() {
    let packet = text_to_binary(b"<LED_OFF>").unwrap();
    let wire = encode(&packet);

    for offset in PAYLOAD_OFFSET..PAYLOAD_OFFSET + usize::from(packet.length()) {
        for bit in 0..8 {
            let mut corrupted = wire;
            corrupted[offset] ^= 1 << bit;

            let packet = Packet::from_bytes(&corrupted).unwrap();
            assert!(
                matches!(parse_packet(&packet), Err(Error::ChecksumMismatch { .. })),
                "bit {bit} at offset {offset} went undetected"
            );
        }
    }
}

#[test]
fn each_rejection_reason_is_distinguishable() {
    let wire = encode(&text_to_binary(b"<LED_ON>").unwrap());

    let mut bad_end = wire;
    bad_end[END_OFFSET] = 0x00;
    assert!(matches!(
        decode(&bad_end),
        Err(Error::InvalidMarkers { end: 0x00, .. })
    ));

    let mut bad_length = wire;
    bad_length[LENGTH_OFFSET] = 200;
    assert!(matches!(
        decode(&bad_length),
        Err(Error::InvalidLength { length: 200, .. })
    ));

    let mut bad_checksum = wire;
    bad_checksum[CHECKSUM_OFFSET] ^= 0x80;
    assert!(matches!(
        decode(&bad_checksum),
        Err(Error::ChecksumMismatch { .. })
    ));

    let mut bad_reserved = wire;
    bad_reserved[RESERVED_OFFSET] = 0x55;
    assert_eq!(
        decode(&bad_reserved),
        Err(Error::ReservedByteSet { value: 0x55 })
    );

    assert!(matches!(
        decode(&wire[..PACKET_SIZE - 1]),
        Err(Error::BufferTooSmall { .. })
    ));
}

#[test]
fn length_change_with_same_bytes_is_detected() {
    let wire = encode(&build_packet(b"LED_ON").unwrap());

    // Shrink the length; the dropped byte is still in the padding.
    let mut truncated = wire;
    truncated[LENGTH_OFFSET] = 5;
    assert!(matches!(
        decode(&truncated),
        Err(Error::ChecksumMismatch { .. })
    ));
}

#[test]
fn text_frame_properties() {
    assert!(is_valid_text_frame(b"<LED_ON>"));
    assert!(!is_valid_text_frame(b"LED_ON"));
    assert!(is_valid_text_frame(b"<>"));
    assert!(matches!(
        extract_command(b"<>"),
        Err(Error::FrameTooShort { .. })
    ));
}

#[test]
fn led_on_frame_to_packet() {
    let packet = text_to_binary(b"<LED_ON>").unwrap();
    let wire = encode(&packet);

    assert_eq!(wire.len(), 37);
    assert_eq!(wire[START_OFFSET], 0xAA);
    assert_eq!(wire[LENGTH_OFFSET], 6);
    assert_eq!(&wire[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 6], b"LED_ON");
    assert!(
        wire[PAYLOAD_OFFSET + 6..CHECKSUM_OFFSET]
            .iter()
            .all(|&b| b == 0)
    );
    assert_eq!(
        wire[CHECKSUM_OFFSET],
        6 ^ b'L' ^ b'E' ^ b'D' ^ b'_' ^ b'O' ^ b'N'
    );
    assert_eq!(wire[RESERVED_OFFSET], 0x00);
    assert_eq!(wire[PACKET_SIZE - 1], 0xBB);

    assert_eq!(binary_to_text(&packet).unwrap(), b"<LED_ON>");
    assert!(render_packet(&packet).contains("Checksum: 0x"));
}

#[test]
fn dispatch_properties() {
    assert_eq!(dispatch(b"LED_ON"), Action::LedOn);
    assert!(matches!(dispatch(b"LED_ONX"), Action::UnknownCommand(_)));
    assert!(matches!(dispatch(b"led_on"), Action::UnknownCommand(_)));
}

#[test]
fn bounded_copy_properties() {
    let mut destination = [0xEEu8; 4];
    assert_eq!(bounded_copy(&mut destination, b"0123456789"), Ok(3));
    assert_eq!(destination, *b"012\0");

    let mut empty: [u8; 0] = [];
    assert!(matches!(
        bounded_copy(&mut empty, b"0123456789"),
        Err(Error::InvalidArguments(_))
    ));
}

#[test]
fn text_and_packet_pipelines_agree() {
    let dispatcher = Dispatcher::default();
    let frames: [&[u8]; 4] = [b"<LED_ON>", b"<LED_OFF>", b"<LED_ONX>", b"<PING>"];

    for frame in frames {
        let from_text = dispatcher.handle_text(frame).unwrap();
        let wire = encode(&text_to_binary(frame).unwrap());
        let from_packet = dispatcher.handle_packet(&wire).unwrap();

        assert_eq!(from_text, from_packet, "pipelines disagree on {frame:?}");
    }
}

#[test]
fn nul_in_payload_splits_the_pipelines() {
    let dispatcher = Dispatcher::default();
    let frame = b"<LED_ON\0X>";

    // Text keeps the NUL; the packet path stops at it.
    let from_text = dispatcher.handle_text(frame).unwrap();
    let wire = encode(&text_to_binary(frame).unwrap());
    let from_packet = dispatcher.handle_packet(&wire).unwrap();

    assert!(matches!(from_text, Action::UnknownCommand(_)));
    assert_eq!(from_packet, Action::LedOn);
}

#[test]
fn flipped_bits_anywhere_outside_padding_are_rejected() {
    let packet = text_to_binary(b"<LED_OFF>").unwrap();
    let padding = PAYLOAD_OFFSET + usize::from(packet.length())..CHECKSUM_OFFSET;

    for offset in (0..PACKET_SIZE).filter(|offset| !padding.contains(offset)) {
        for bit in 0..8 {
            let damaged = packet.with_flipped_bit(offset, bit).unwrap();
            assert!(
                decode(&damaged.to_bytes()).is_err(),
                "bit {bit} at offset {offset} was accepted"
            );
        }
    }
}
