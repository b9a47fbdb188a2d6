/*
 * Copyright 2020 UT OVERSEAS INC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */


use lazy_static::lazy_static;

use crate::buffer::SharedBuffer;
use crate::context::Context;
use crate::layout::{Field, FieldLayout, LayoutBuilder};
use crate::open_enum;
use crate::protocol::ether_type::EtherType;
use crate::utils::errors::Result;
use crate::utils::types::{Index, U16_SIZE};
use crate::view::{HeaderView, VariableLengthField};

/**
 * Linux cooked capture header, what libpcap prepends to frames captured on the "any" device
 *
 * <pre>
 *  0                   1                   2                   3
 *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |          Packet Type          |         Linux ARPHRD          |
 * +-------------------------------+-------------------------------+
 * |  Link Layer Address Length    |                               |
 * +-------------------------------+                               +
 * |                Link Layer Address (8 bytes)                   |
 * +                               +-------------------------------+
 * |                               |        Protocol Type          |
 * +-------------------------------+-------------------------------+
 * </pre>
 *
 * The header is always 16 bytes. Only the first "Link Layer Address Length" bytes of the
 * address window are meaningful.
 */
pub struct LinuxSllFields {
    pub packet_type: Field,
    pub linux_arphrd: Field,
    pub link_layer_address_length: Field,
    pub link_layer_header: Field,
    pub ethernet_protocol_type: Field,
    pub layout: FieldLayout,
}

pub const LINK_LAYER_ADDRESS_MAX_LENGTH: Index = 8;

pub const ARPHRD_ETHER: u16 = 1;

impl LinuxSllFields {
    fn build() -> Self {
        let mut layout = LayoutBuilder::new("linux sll");
        let packet_type = layout.append("packet_type", U16_SIZE);
        let linux_arphrd = layout.append("linux_arphrd", U16_SIZE);
        let link_layer_address_length = layout.append("link_layer_address_length", U16_SIZE);
        let link_layer_header = layout.append("link_layer_header", LINK_LAYER_ADDRESS_MAX_LENGTH);
        let ethernet_protocol_type = layout.append("ethernet_protocol_type", U16_SIZE);

        Self {
            packet_type,
            linux_arphrd,
            link_layer_address_length,
            link_layer_header,
            ethernet_protocol_type,
            layout: layout.finish_static(),
        }
    }

    pub fn link_layer_address(&self) -> VariableLengthField {
        VariableLengthField::up_to(self.link_layer_address_length, self.link_layer_header)
    }
}

lazy_static! {
    pub static ref LINUX_SLL_FIELDS: LinuxSllFields = LinuxSllFields::build();
    pub static ref LINUX_SLL_HEADER_LENGTH: Index = LINUX_SLL_FIELDS.layout.length();
}

open_enum! {
    /// Direction of a cooked capture frame relative to the capturing host
    pub struct LinuxSllType(u16) {
        SENT_TO_US = 0,
        BROADCAST = 1,
        MULTICAST = 2,
        TO_OTHER_HOST = 3,
        SENT_BY_US = 4,
    }
}

#[derive(Debug)]
pub struct LinuxSllPacket {
    header: HeaderView,
}

impl LinuxSllPacket {
    pub fn from_view(header: HeaderView) -> Result<Self> {
        header.check(0, *LINUX_SLL_HEADER_LENGTH)?;
        Ok(Self { header })
    }

    pub fn parse(buffer: SharedBuffer, offset: Index) -> Result<Self> {
        Self::from_view(HeaderView::new(buffer, offset, *LINUX_SLL_HEADER_LENGTH)?)
    }

    pub fn new(link_layer_address: &[u8], ethernet_protocol_type: EtherType) -> Result<Self> {
        Self::with_context(&Context::default(), link_layer_address, ethernet_protocol_type)
    }

    pub fn with_context(
        context: &Context,
        link_layer_address: &[u8],
        ethernet_protocol_type: EtherType,
    ) -> Result<Self> {
        let mut packet = Self::parse(SharedBuffer::with_capacity(*LINUX_SLL_HEADER_LENGTH), 0)?;

        packet.set_packet_type(context.sll_packet_type())?;
        packet.set_arphrd(context.sll_arphrd())?;
        packet.set_link_layer_header(link_layer_address)?;
        packet.set_ethernet_protocol_type(ethernet_protocol_type)?;

        Ok(packet)
    }

    #[inline]
    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    pub fn packet_type(&self) -> Result<LinuxSllType> {
        self.header.get::<u16>(&LINUX_SLL_FIELDS.packet_type).map(LinuxSllType::from)
    }

    // The Linux ARPHRD_ value, i.e. the hardware type of the capturing interface
    pub fn arphrd(&self) -> Result<u16> {
        self.header.get(&LINUX_SLL_FIELDS.linux_arphrd)
    }

    pub fn link_layer_address_length(&self) -> Result<Index> {
        LINUX_SLL_FIELDS.link_layer_address().length(&self.header)
    }

    pub fn link_layer_header(&self) -> Result<Vec<u8>> {
        LINUX_SLL_FIELDS.link_layer_address().get(&self.header)
    }

    pub fn ethernet_protocol_type(&self) -> Result<EtherType> {
        self.header
            .get::<u16>(&LINUX_SLL_FIELDS.ethernet_protocol_type)
            .map(EtherType::from)
    }

    pub fn set_packet_type(&mut self, value: LinuxSllType) -> Result<()> {
        self.header.put(&LINUX_SLL_FIELDS.packet_type, value.raw())
    }

    pub fn set_arphrd(&mut self, value: u16) -> Result<()> {
        self.header.put(&LINUX_SLL_FIELDS.linux_arphrd, value)
    }

    /// Accepts 0 to 8, anything else is a range error and leaves the header alone.
    pub fn set_link_layer_address_length(&mut self, length: Index) -> Result<()> {
        LINUX_SLL_FIELDS.link_layer_address().set_length(&self.header, length)
    }

    /// Writes the address length, then the address itself, zero padded to 8 bytes.
    pub fn set_link_layer_header(&mut self, address: &[u8]) -> Result<()> {
        LINUX_SLL_FIELDS.link_layer_address().set(&self.header, address)
    }

    pub fn set_ethernet_protocol_type(&mut self, value: EtherType) -> Result<()> {
        self.header.put(&LINUX_SLL_FIELDS.ethernet_protocol_type, value.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::{OverlayError, RangeError};

    // Captured on "any": IPv4 frame received from 00:11:22:33:44:55
    const CAPTURED: [u8; 18] = [
        0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x00, 0x00, 0x08,
        0x00, 0x45, 0x00,
    ];

    #[test]
    fn layout_positions() {
        assert_eq!(LINUX_SLL_FIELDS.layout.offsets(), vec![0, 2, 4, 6, 14]);
        assert_eq!(*LINUX_SLL_HEADER_LENGTH, 16);
    }

    #[test]
    fn parse_captured_header() {
        let packet = LinuxSllPacket::parse(SharedBuffer::from_slice(&CAPTURED), 0).unwrap();

        assert_eq!(packet.packet_type().unwrap(), LinuxSllType::SENT_TO_US);
        assert_eq!(packet.arphrd().unwrap(), ARPHRD_ETHER);
        assert_eq!(packet.link_layer_address_length().unwrap(), 6);
        assert_eq!(packet.link_layer_header().unwrap(), vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(packet.ethernet_protocol_type().unwrap(), EtherType::IPV4);
    }

    #[test]
    fn setting_address_updates_length() {
        let mut packet = LinuxSllPacket::parse(SharedBuffer::from_slice(&CAPTURED), 0).unwrap();

        for len in 0..=LINK_LAYER_ADDRESS_MAX_LENGTH {
            let address: Vec<u8> = (1..=len as u8).collect();
            packet.set_link_layer_header(&address).unwrap();

            assert_eq!(packet.link_layer_address_length().unwrap(), len);
            assert_eq!(packet.link_layer_header().unwrap(), address);
            assert_eq!(packet.ethernet_protocol_type().unwrap(), EtherType::IPV4);
        }
    }

    #[test]
    fn nine_byte_address_is_rejected() {
        let mut packet = LinuxSllPacket::parse(SharedBuffer::from_slice(&CAPTURED), 0).unwrap();
        let before = packet.header().to_vec().unwrap();

        assert_eq!(
            packet.set_link_layer_header(&[0xaa; 9]),
            Err(OverlayError::Range(RangeError::ValueOutOfBounds {
                field: "link_layer_address_length",
                value: 9,
                max: 8
            }))
        );
        assert_eq!(packet.header().to_vec().unwrap(), before);
    }

    #[test]
    fn address_length_setter_checks_range() {
        let mut packet = LinuxSllPacket::parse(SharedBuffer::from_slice(&CAPTURED), 0).unwrap();

        packet.set_link_layer_address_length(8).unwrap();
        assert_eq!(packet.link_layer_address_length().unwrap(), 8);
        assert_eq!(
            packet.link_layer_header().unwrap(),
            vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x00, 0x00]
        );

        assert!(packet.set_link_layer_address_length(9).unwrap_err().is_range_error());
        assert_eq!(packet.link_layer_address_length().unwrap(), 8);
    }

    #[test]
    fn built_header_wire_format() {
        let packet = LinuxSllPacket::new(&[0xde, 0xad, 0xbe, 0xef], EtherType::IPV6).unwrap();

        assert_eq!(
            packet.header().to_vec().unwrap(),
            vec![0, 4, 0, 1, 0, 4, 0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0, 0x86, 0xdd]
        );
    }

    #[test]
    fn unknown_packet_type_is_preserved() {
        let mut packet = LinuxSllPacket::parse(SharedBuffer::from_slice(&CAPTURED), 0).unwrap();
        packet.set_packet_type(LinuxSllType::new(42)).unwrap();

        assert_eq!(packet.packet_type().unwrap().raw(), 42);
        assert!(!packet.packet_type().unwrap().is_known());
    }

    #[test]
    fn header_inside_larger_frame() {
        let mut frame = vec![0xffu8; 4];
        frame.extend_from_slice(&CAPTURED);
        let buffer = SharedBuffer::from_vec(frame);
        let mut packet = LinuxSllPacket::parse(buffer.clone(), 4).unwrap();
        packet.set_ethernet_protocol_type(EtherType::ARP).unwrap();

        assert_eq!(buffer.get_bytes(18, 2).unwrap(), vec![0x08, 0x06]);
        assert_eq!(buffer.get_bytes(0, 4).unwrap(), vec![0xff; 4]);
    }

    #[test]
    fn packet_prints_its_header() {
        let packet = LinuxSllPacket::parse(SharedBuffer::from_slice(&CAPTURED), 0).unwrap();
        let printed = format!("{:?}", packet);

        assert!(printed.starts_with("LinuxSllPacket { header: HeaderView {"));
        assert!(printed.contains("length: 16"));
    }
}
