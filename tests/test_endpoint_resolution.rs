use std::net::Ipv4Addr;

use flowmeta::datatype::{
    format_group_id, group_id_to_string, EndpointData, EndpointInfo, IpNet, LookupKey, MacAddr,
    PlatformData, TapType, EPC_FROM_INTERNET, INVALID_ENDPOINT_DATA,
};

fn platform_data(epc_id: i32, ranges: Vec<IpNet>) -> PlatformData {
    PlatformData {
        epc_id,
        device_type: 3,
        device_id: 300,
        host_ip: Ipv4Addr::new(192, 168, 10, 1),
        mac: MacAddr::new(0x0200_0000_0001),
        group_ids: vec![1, 2],
        ips: ranges,
    }
}

#[test]
fn test_l3_epc_sentinel_rule() {
    for (raw, expected) in [(0, EPC_FROM_INTERNET), (1, 1), (-5, -5), (i32::MAX, i32::MAX)] {
        let mut info = EndpointInfo::new();
        info.set_l3_data(&platform_data(raw, vec![]), Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(info.l3_epc_id, expected, "raw epc {}", raw);
    }
}

#[test]
fn test_l2_population_has_no_sentinel() {
    let mut info = EndpointInfo::new();
    info.set_l2_data(&platform_data(0, vec![]));
    assert_eq!(info.l2_epc_id, 0);
    assert_eq!(info.l3_epc_id, 0);
}

#[test]
fn test_subnet_first_match_not_longest_prefix() {
    let ranges = vec![
        IpNet::new(Ipv4Addr::new(10, 0, 0, 0), 16, 1),
        IpNet::new(Ipv4Addr::new(10, 0, 0, 0), 24, 2),
        IpNet::new(Ipv4Addr::new(10, 0, 0, 5), 32, 3),
    ];
    let mut info = EndpointInfo::new();
    info.set_l3_data(&platform_data(1, ranges), Ipv4Addr::new(10, 0, 0, 5));
    assert_eq!(info.subnet_id, 1);
}

#[test]
fn test_zero_prefix_matches_every_address() {
    let ranges = vec![IpNet::new(Ipv4Addr::UNSPECIFIED, 0, 9)];
    for ip in [
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::new(10, 0, 0, 5),
        Ipv4Addr::new(203, 0, 113, 7),
        Ipv4Addr::BROADCAST,
    ] {
        let data = platform_data(1, ranges.clone());

        let mut info = EndpointInfo::new();
        info.set_l3_data(&data, ip);
        assert_eq!(info.subnet_id, 9, "address {}", ip);

        let mut info = EndpointInfo::new();
        info.set_l3_end_by_ip(&data, ip);
        assert!(info.l3_end, "address {}", ip);
        assert_eq!(info.subnet_id, 0);
    }
}

#[test]
fn test_subnet_skips_invalid_prefix() {
    let ranges = vec![
        IpNet::new(Ipv4Addr::new(10, 0, 0, 5), 48, 1),
        IpNet::new(Ipv4Addr::new(10, 0, 0, 0), 24, 2),
    ];
    let mut info = EndpointInfo::new();
    info.set_l3_data(&platform_data(1, ranges), Ipv4Addr::new(10, 0, 0, 5));
    assert_eq!(info.subnet_id, 2);
}

#[test]
fn test_subnet_unset_without_match() {
    let ranges = vec![IpNet::new(Ipv4Addr::new(10, 0, 1, 0), 24, 42)];
    let mut info = EndpointInfo::new();
    info.set_l3_data(&platform_data(1, ranges), Ipv4Addr::new(10, 0, 0, 5));
    assert_eq!(info.subnet_id, 0);
    assert_eq!(info.l3_device_id, 300);
}

#[test]
fn test_heuristics_accumulate() {
    let data = platform_data(1, vec![IpNet::new(Ipv4Addr::new(10, 0, 0, 0), 24, 42)]);
    let mut info = EndpointInfo::new();

    info.set_l3_end_by_ttl(63);
    assert!(!info.l3_end);
    info.set_l3_end_by_ip(&data, Ipv4Addr::new(10, 0, 0, 5));
    assert!(info.l3_end);

    // later heuristics that do not match never clear the flag
    info.set_l3_end_by_ttl(32);
    info.set_l3_end_by_ip(&data, Ipv4Addr::new(8, 8, 8, 8));
    info.set_l3_end_by_mac(&data, MacAddr::ZERO);
    assert!(info.l3_end);
}

#[test]
fn test_group_ids_append_across_calls() {
    let mut info = EndpointInfo::new();
    info.set_l2_data(&platform_data(1, vec![]));

    let mut other = platform_data(2, vec![]);
    other.group_ids = vec![2, 3];
    info.set_l2_data(&other);

    assert_eq!(info.group_ids, vec![1, 2, 2, 3]);
    assert_eq!(info.l2_epc_id, 2);
    assert_eq!(info.group_ids_string(), "DEV-1 DEV-2 DEV-2 DEV-3 ");
}

#[test]
fn test_group_codec() {
    assert_eq!(group_id_to_string(5), "DEV-5 ");
    assert_eq!(group_id_to_string(1_000_000_007), "IP-7 ");
    assert_eq!(format_group_id(5), 5);
    assert_eq!(format_group_id(1_000_000_007), 7);
}

#[test]
fn test_tap_validity() {
    assert!(TapType::check_tap_type(TapType::Any as u8));
    assert!(TapType::check_tap_type(TapType::Tor as u8));
    assert!(!TapType::check_tap_type(TapType::Max as u8));
    assert!(!TapType::check_tap_type(TapType::Max as u8 + 1));
}

#[test]
fn test_pair_display() {
    let mut data = EndpointData::new();
    let key = LookupKey {
        l2_end_0: false,
        l2_end_1: true,
        ..Default::default()
    };
    data.set_l2_end(&key);
    data.src_info.set_l2_data(&platform_data(7, vec![]));
    data.src_info.set_l3_end_by_ttl(128);

    let expected = "SRC: {L2EpcId: 7 L2DeviceType: 3 L2DeviceId: 300 L2End: false \
                    L3EpcId: 0 L3DeviceType: 0 L3DeviceId: 0 L3End: true \
                    HostIp: 3232238081 SubnetId: 0 GroupIds: [DEV-1 DEV-2 ]},\t\
                    DST: {L2EpcId: 0 L2DeviceType: 0 L2DeviceId: 0 L2End: true \
                    L3EpcId: 0 L3DeviceType: 0 L3DeviceId: 0 L3End: false \
                    HostIp: 0 SubnetId: 0 GroupIds: []}";
    assert_eq!(data.to_string(), expected);
}

#[test]
fn test_invalid_endpoint_data_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| INVALID_ENDPOINT_DATA.to_string()))
        .collect();
    let expected = EndpointData::new().to_string();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
