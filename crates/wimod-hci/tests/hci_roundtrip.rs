//! Integration tests for the public packet-level API.
//!
//! Packets are built by hand the way the module puts them on the wire and
//! pushed through `encode_request`, `decode_response` and `decode_indication`.

use wimod_hci::*;

fn reply(id: u8, body: &[u8]) -> HciPacket {
    let mut payload = vec![DEVMGMT_STATUS_OK];
    payload.extend_from_slice(body);
    HciPacket::new(LORAWAN_SAP_ID, id, payload)
}

fn key(seed: u8) -> Key {
    let mut bytes = [0u8; KEY_SIZE];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = seed.wrapping_add(i as u8);
    }
    Key::new(bytes)
}

#[test]
fn test_request_identities() {
    let config = RStackConfig::default();
    let eui = Eui::new([1, 2, 3, 4, 5, 6, 7, 8]);
    let packets = [
        (
            encode_request(&ActivateDeviceReq::new(1, key(0), key(1))).unwrap(),
            LORAWAN_MSG_ACTIVATE_DEVICE_REQ,
        ),
        (
            encode_request(&SetJoinParamReq::new(eui, key(2))).unwrap(),
            LORAWAN_MSG_SET_JOIN_PARAM_REQ,
        ),
        (encode_request(&JoinNetworkReq).unwrap(), LORAWAN_MSG_JOIN_NETWORK_REQ),
        (
            encode_request(&SendUDataReq::new(1, vec![0xAA])).unwrap(),
            LORAWAN_MSG_SEND_UDATA_REQ,
        ),
        (
            encode_request(&SendCDataReq::new(1, vec![0xAA])).unwrap(),
            LORAWAN_MSG_SEND_CDATA_REQ,
        ),
        (
            encode_request(&SetRStackConfigReq::new(config)).unwrap(),
            LORAWAN_MSG_SET_RSTACK_CONFIG_REQ,
        ),
        (
            encode_request(&GetRStackConfigReq).unwrap(),
            LORAWAN_MSG_GET_RSTACK_CONFIG_REQ,
        ),
        (
            encode_request(&ReactivateDeviceReq).unwrap(),
            LORAWAN_MSG_REACTIVATE_DEVICE_REQ,
        ),
        (
            encode_request(&DeactivateDeviceReq).unwrap(),
            LORAWAN_MSG_DEACTIVATE_DEVICE_REQ,
        ),
        (encode_request(&FactoryResetReq).unwrap(), LORAWAN_MSG_FACTORY_RESET_REQ),
        (
            encode_request(&SetDeviceEuiReq::new(eui)).unwrap(),
            LORAWAN_MSG_SET_DEVICE_EUI_REQ,
        ),
        (encode_request(&GetDeviceEuiReq).unwrap(), LORAWAN_MSG_GET_DEVICE_EUI_REQ),
        (encode_request(&GetNwkStatusReq).unwrap(), LORAWAN_MSG_GET_NWK_STATUS_REQ),
    ];

    for (packet, id) in packets {
        assert_eq!(packet.dst, LORAWAN_SAP_ID);
        assert_eq!(packet.id, id);
        assert!(!is_indication(packet.dst, packet.id));
    }
}

#[test]
fn test_activate_device_wire_layout() {
    let packet = encode_request(&ActivateDeviceReq::new(0x1122_3344, key(0x10), key(0x80))).unwrap();
    assert_eq!(packet.payload.len(), 4 + 2 * KEY_SIZE);
    assert_eq!(&packet.payload[..4], &[0x44, 0x33, 0x22, 0x11]);
    // Network session key first, application session key second.
    assert_eq!(&packet.payload[4..20], key(0x80).as_bytes());
    assert_eq!(&packet.payload[20..36], key(0x10).as_bytes());
}

#[test]
fn test_set_join_param_wire_layout() {
    let eui: Eui = "70B3D57ED0000001".parse().unwrap();
    let packet = encode_request(&SetJoinParamReq::new(eui, key(0))).unwrap();
    assert_eq!(
        &packet.payload[..EUI_SIZE],
        &[0x70, 0xB3, 0xD5, 0x7E, 0xD0, 0x00, 0x00, 0x01]
    );
    assert_eq!(&packet.payload[EUI_SIZE..], key(0).as_bytes());
}

#[test]
fn test_send_udata_payload_limit() {
    let max = SendUDataReq::new(2, vec![0x55; MAX_APP_PAYLOAD_SIZE]);
    assert_eq!(encode_request(&max).unwrap().payload.len(), 1 + MAX_APP_PAYLOAD_SIZE);

    let over = SendCDataReq::new(2, vec![0x55; MAX_APP_PAYLOAD_SIZE + 1]);
    assert!(matches!(
        encode_request(&over),
        Err(HciError::PayloadTooLarge { .. })
    ));
}

#[test]
fn test_status_only_responses_device_failure() {
    // Every device management failure code is surfaced, whatever follows it.
    for code in [
        DEVMGMT_STATUS_ERROR,
        DEVMGMT_STATUS_CMD_NOT_SUPPORTED,
        DEVMGMT_STATUS_WRONG_PARAMETER,
    ] {
        let expected = HciError::DeviceStatus(DevMgmtStatus::from(code));
        let packet = |id| HciPacket::new(LORAWAN_SAP_ID, id, vec![code, LORAWAN_STATUS_OK]);

        let errors = [
            decode_response::<ActivateDeviceResp>(&packet(LORAWAN_MSG_ACTIVATE_DEVICE_RSP)).unwrap_err(),
            decode_response::<SetJoinParamResp>(&packet(LORAWAN_MSG_SET_JOIN_PARAM_RSP)).unwrap_err(),
            decode_response::<JoinNetworkResp>(&packet(LORAWAN_MSG_JOIN_NETWORK_RSP)).unwrap_err(),
            decode_response::<DeactivateDeviceResp>(&packet(LORAWAN_MSG_DEACTIVATE_DEVICE_RSP)).unwrap_err(),
            decode_response::<FactoryResetResp>(&packet(LORAWAN_MSG_FACTORY_RESET_RSP)).unwrap_err(),
            decode_response::<SetDeviceEuiResp>(&packet(LORAWAN_MSG_SET_DEVICE_EUI_RSP)).unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err, expected);
        }
    }
}

#[test]
fn test_status_only_responses_lorawan_failure() {
    let packet = reply(LORAWAN_MSG_SET_JOIN_PARAM_RSP, &[LORAWAN_STATUS_WRONG_PARAMETER]);
    let err = decode_response::<SetJoinParamResp>(&packet).unwrap_err();
    assert_eq!(err, HciError::LoRaWanStatus(LoRaWanStatus::WrongParameter));
}

#[test]
fn test_response_identity_mismatch() {
    let packet = reply(LORAWAN_MSG_GET_DEVICE_EUI_RSP, &[LORAWAN_STATUS_OK; 9]);
    assert_eq!(
        decode_response::<GetNwkStatusResp>(&packet),
        Err(HciError::IdentityMismatch {
            expected: MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_GET_NWK_STATUS_RSP),
            actual: MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_GET_DEVICE_EUI_RSP),
        })
    );

    // Same id on another endpoint is a different message.
    let other_sap = HciPacket::new(
        DEVMGMT_SAP_ID,
        LORAWAN_MSG_JOIN_NETWORK_RSP,
        vec![DEVMGMT_STATUS_OK, LORAWAN_STATUS_OK],
    );
    assert!(matches!(
        decode_response::<JoinNetworkResp>(&other_sap),
        Err(HciError::IdentityMismatch { .. })
    ));
}

#[test]
fn test_send_udata_channel_blocked() {
    let mut body = vec![LORAWAN_STATUS_CHANNEL_BLOCKED];
    body.extend_from_slice(&1000u32.to_le_bytes());
    let packet = reply(LORAWAN_MSG_SEND_UDATA_RSP, &body);
    assert_eq!(
        decode_response::<SendUDataResp>(&packet),
        Err(HciError::ChannelBlocked {
            remaining_time: 1000
        })
    );
}

#[test]
fn test_get_rstack_config_response() {
    let packet = reply(
        LORAWAN_MSG_GET_RSTACK_CONFIG_RSP,
        &[LORAWAN_STATUS_OK, 5, 14, 0b1100_0101, 0x01, 7, 3, 15],
    );
    let resp: GetRStackConfigResp = decode_response(&packet).unwrap();
    let config = resp.config;
    assert_eq!(config.default_data_rate_idx, 5);
    assert_eq!(config.tx_power_level, 14);
    assert!(config.adaptive_data_rate);
    assert!(!config.duty_cycle_control);
    assert!(config.class_c);
    assert!(config.mac_events);
    assert!(config.extended_hci);
    assert!(config.automatic_power_saving);
    assert_eq!(config.max_retransmissions, 7);
    assert_eq!(config.band_idx, 3);
    assert_eq!(config.header_mac_cmd_capacity, 15);

    // Writing the configuration back produces the same bytes.
    let set = encode_request(&SetRStackConfigReq::new(config)).unwrap();
    assert_eq!(set.payload, &packet.payload[2..]);
}

#[test]
fn test_nwk_status_response() {
    let active = reply(
        LORAWAN_MSG_GET_NWK_STATUS_RSP,
        &[
            LORAWAN_STATUS_OK,
            LORAWAN_NETWORK_STATUS_ACTIVE_OTAA,
            0x78,
            0x56,
            0x34,
            0x12,
            3,
            16,
            51,
        ],
    );
    let resp: GetNwkStatusResp = decode_response(&active).unwrap();
    assert!(resp.network.is_active());
    assert_eq!(resp.network.address, 0x1234_5678);
    assert_eq!(resp.network.max_payload_size, 51);

    let inactive = reply(
        LORAWAN_MSG_GET_NWK_STATUS_RSP,
        &[LORAWAN_STATUS_OK, LORAWAN_NETWORK_STATUS_INACTIVE],
    );
    let resp: GetNwkStatusResp = decode_response(&inactive).unwrap();
    assert!(!resp.network.is_active());
    assert_eq!(resp.network.address, 0);
}

#[test]
fn test_device_eui_round_trip() {
    let eui: Eui = "0011223344556677".parse().unwrap();
    let set = encode_request(&SetDeviceEuiReq::new(eui)).unwrap();

    let mut body = vec![LORAWAN_STATUS_OK];
    body.extend_from_slice(&set.payload);
    let resp: GetDeviceEuiResp = decode_response(&reply(LORAWAN_MSG_GET_DEVICE_EUI_RSP, &body)).unwrap();
    assert_eq!(resp.eui, eui);
    assert_eq!(resp.eui.to_string(), "0011223344556677");
}

#[test]
fn test_join_sequence_indications() {
    let mut tx = vec![LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_OK_ATTACHMENT, 2, 0, 1, 14];
    tx.extend_from_slice(&41u32.to_le_bytes());
    match decode_indication(&reply(LORAWAN_MSG_JOIN_NETWORK_TX_IND, &tx)).unwrap() {
        AnyIndication::JoinNetworkTx(ind) => {
            assert_eq!(ind.tx_info.channel_idx, 2);
            assert_eq!(ind.tx_info.num_tx_packets, 1);
            assert_eq!(ind.tx_info.rf_message_airtime, 41);
        }
        other => panic!("unexpected indication {:?}", other),
    }

    let joined = [
        LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK_ATTACHMENT,
        0x01,
        0x00,
        0x00,
        0x26,
        1,
        5,
        0xB5,
        7,
        1,
    ];
    match decode_indication(&reply(LORAWAN_MSG_JOIN_NETWORK_IND, &joined)).unwrap() {
        AnyIndication::JoinNetwork(ind) => {
            assert_eq!(ind.status, LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK_ATTACHMENT);
            assert_eq!(ind.address, 0x2600_0001);
            assert_eq!(ind.rssi, 0xB5);
            assert_eq!(ind.rx_slot, 1);
        }
        other => panic!("unexpected indication {:?}", other),
    }
}

#[test]
fn test_join_failure_is_reported_as_status() {
    let ind = decode_indication(&reply(LORAWAN_MSG_JOIN_NETWORK_IND, &[0x7F])).unwrap();
    assert_eq!(ind.status(), LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_ERROR);
}

#[test]
fn test_uplink_tx_indication_failure() {
    let packet = reply(LORAWAN_MSG_SEND_UDATA_TX_IND, &[0x05]);
    assert_eq!(
        decode_indication(&packet),
        Err(HciError::IndicationError {
            code: MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_SEND_UDATA_TX_IND),
            status: 0x05,
        })
    );
}

#[test]
fn test_downlink_indication() {
    let body = [
        RECV_FORMAT_ATTACHMENT | RECV_FORMAT_ACK,
        10,
        0xDE,
        0xAD,
        4,
        0,
        0xC4,
        0xF9,
        2,
    ];
    match decode_indication(&reply(LORAWAN_MSG_RECV_UDATA_IND, &body)).unwrap() {
        AnyIndication::RecvUData(ind) => {
            assert_eq!(ind.port, 10);
            assert_eq!(ind.payload, vec![0xDE, 0xAD]);
            assert!(ind.ack_received());
            assert!(!ind.frame_pending());
            let rx = ind.rx_info.unwrap();
            assert_eq!(rx.rssi, -60);
            assert_eq!(rx.snr, -7);
            assert_eq!(rx.rx_slot, 2);
        }
        other => panic!("unexpected indication {:?}", other),
    }
}

#[test]
fn test_indication_device_failure() {
    let packet = HciPacket::new(
        LORAWAN_SAP_ID,
        LORAWAN_MSG_RECV_NO_DATA_IND,
        vec![DEVMGMT_STATUS_ERROR, 0],
    );
    assert_eq!(
        decode_indication(&packet),
        Err(HciError::DeviceStatus(DevMgmtStatus::Error))
    );
}

#[test]
fn test_every_indication_is_dispatched() {
    assert_eq!(check_dispatch_table(), Ok(()));
    for code in INDICATION_CODES {
        assert!(is_indication(code.dst, code.id));
        let ind = decode_indication(&HciPacket::new(code.dst, code.id, vec![0, 0, 0])).unwrap();
        assert_eq!(ind.code(), code);
    }
}

#[test]
fn test_responses_are_not_indications() {
    let packet = reply(LORAWAN_MSG_JOIN_NETWORK_RSP, &[LORAWAN_STATUS_OK]);
    assert_eq!(
        decode_indication(&packet),
        Err(HciError::NotAnIndication(packet.message_code()))
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_indication_records_serialize() {
    let ind = JoinNetworkTxInd::decode(&[LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_OK]).unwrap();
    let json = serde_json::to_string(&ind.tx_info).unwrap();
    assert!(json.contains("rf_message_airtime"));
}
