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


use std::net::Ipv4Addr;

use lazy_static::lazy_static;

use crate::buffer::SharedBuffer;
use crate::context::Context;
use crate::layout::{Field, FieldLayout, LayoutBuilder};
use crate::open_enum;
use crate::protocol::ether_type::EtherType;
use crate::utils::errors::{RangeError, Result};
use crate::utils::types::{Index, IPV4_ADDRESS_LENGTH, MAC_ADDRESS_LENGTH, U16_SIZE, U8_SIZE};
use crate::view::{HeaderView, VariableLengthField};

/**
 * ARP header for Ethernet hardware and IPv4 protocol addresses
 * <p>
 * <a href="https://tools.ietf.org/html/rfc826">RFC 826</a>
 *
 * <pre>
 *  0                   1                   2                   3
 *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |     Hardware Address Type     |     Protocol Address Type     |
 * +---------------+---------------+-------------------------------+
 * |  HW Addr Len  | Proto Addr Len|           Operation           |
 * +---------------+---------------+-------------------------------+
 * |                 Sender Hardware Address                      ...
 * ...                             +-------------------------------+
 * |                               |  Sender Protocol Address     ...
 * +-------------------------------+-------------------------------+
 * ...                             |  Target Hardware Address     ...
 * +-------------------------------+                               |
 * ...                                                             |
 * +---------------------------------------------------------------+
 * |                    Target Protocol Address                    |
 * +---------------------------------------------------------------+
 * </pre>
 *
 * Address positions assume 6 byte hardware and 4 byte protocol addresses. The number of
 * meaningful hardware address bytes is still taken from the hardware address length field.
 */
pub struct ArpFields {
    pub hardware_address_type: Field,
    pub protocol_address_type: Field,
    pub hardware_address_length: Field,
    pub protocol_address_length: Field,
    pub operation: Field,
    pub sender_hardware_address: Field,
    pub sender_protocol_address: Field,
    pub target_hardware_address: Field,
    pub target_protocol_address: Field,
    pub layout: FieldLayout,
}

impl ArpFields {
    fn build() -> Self {
        let mut layout = LayoutBuilder::new("arp");
        let hardware_address_type = layout.append("hardware_address_type", U16_SIZE);
        let protocol_address_type = layout.append("protocol_address_type", U16_SIZE);
        let hardware_address_length = layout.append("hardware_address_length", U8_SIZE);
        let protocol_address_length = layout.append("protocol_address_length", U8_SIZE);
        let operation = layout.append("operation", U16_SIZE);
        let sender_hardware_address = layout.append("sender_hardware_address", MAC_ADDRESS_LENGTH);
        let sender_protocol_address = layout.append("sender_protocol_address", IPV4_ADDRESS_LENGTH);
        let target_hardware_address = layout.append("target_hardware_address", MAC_ADDRESS_LENGTH);
        let target_protocol_address = layout.append("target_protocol_address", IPV4_ADDRESS_LENGTH);

        Self {
            hardware_address_type,
            protocol_address_type,
            hardware_address_length,
            protocol_address_length,
            operation,
            sender_hardware_address,
            sender_protocol_address,
            target_hardware_address,
            target_protocol_address,
            layout: layout.finish_static(),
        }
    }

    pub fn sender_hardware(&self) -> VariableLengthField {
        VariableLengthField::fixed(self.hardware_address_length, self.sender_hardware_address)
    }

    pub fn target_hardware(&self) -> VariableLengthField {
        VariableLengthField::fixed(self.hardware_address_length, self.target_hardware_address)
    }
}

lazy_static! {
    pub static ref ARP_FIELDS: ArpFields = ArpFields::build();
    pub static ref ARP_HEADER_LENGTH: Index = ARP_FIELDS.layout.length();
}

pub const ARP_HARDWARE_TYPE_ETHERNET: u16 = 1;

open_enum! {
    /// ARP operation code
    pub struct ArpOperation(u16) {
        REQUEST = 1,
        RESPONSE = 2,
        REQUEST_REVERSE = 3,
        REPLY_REVERSE = 4,
        DRARP_REQUEST = 5,
        DRARP_REPLY = 6,
        DRARP_ERROR = 7,
        IN_ARP_REQUEST = 8,
        IN_ARP_REPLY = 9,
        ARP_NAK = 10,
    }
}

#[derive(Debug)]
pub struct ArpPacket {
    header: HeaderView,
}

impl ArpPacket {
    pub fn from_view(header: HeaderView) -> Result<Self> {
        header.check(0, *ARP_HEADER_LENGTH)?;
        Ok(Self { header })
    }

    // Overlay an ARP header found at "offset" of a captured frame
    pub fn parse(buffer: SharedBuffer, offset: Index) -> Result<Self> {
        Self::from_view(HeaderView::new(buffer, offset, *ARP_HEADER_LENGTH)?)
    }

    pub fn new(
        operation: ArpOperation,
        sender_hardware_address: &[u8],
        sender_protocol_address: Ipv4Addr,
        target_hardware_address: &[u8],
        target_protocol_address: Ipv4Addr,
    ) -> Result<Self> {
        Self::with_context(
            &Context::default(),
            operation,
            sender_hardware_address,
            sender_protocol_address,
            target_hardware_address,
            target_protocol_address,
        )
    }

    /// Builds a request or reply on a freshly allocated buffer. Lengths are written before the
    /// addresses they govern.
    pub fn with_context(
        context: &Context,
        operation: ArpOperation,
        sender_hardware_address: &[u8],
        sender_protocol_address: Ipv4Addr,
        target_hardware_address: &[u8],
        target_protocol_address: Ipv4Addr,
    ) -> Result<Self> {
        let mut packet = Self::parse(SharedBuffer::with_capacity(*ARP_HEADER_LENGTH), 0)?;

        packet.set_hardware_address_type(context.arp_hardware_address_type())?;
        packet.set_protocol_address_type(context.arp_protocol_address_type())?;
        packet.set_hardware_address_length(MAC_ADDRESS_LENGTH as u8)?;
        packet.set_protocol_address_length(IPV4_ADDRESS_LENGTH as u8)?;
        packet.set_operation(operation)?;
        packet.set_sender_hardware_address(sender_hardware_address)?;
        packet.set_sender_protocol_address(sender_protocol_address)?;
        packet.set_target_hardware_address(target_hardware_address)?;
        packet.set_target_protocol_address(target_protocol_address)?;

        log::trace!("built ARP {:?} for {}", operation, target_protocol_address);
        Ok(packet)
    }

    #[inline]
    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    // Getters
    pub fn hardware_address_type(&self) -> Result<u16> {
        self.header.get(&ARP_FIELDS.hardware_address_type)
    }

    pub fn protocol_address_type(&self) -> Result<EtherType> {
        self.header.get::<u16>(&ARP_FIELDS.protocol_address_type).map(EtherType::from)
    }

    pub fn hardware_address_length(&self) -> Result<u8> {
        self.header.get(&ARP_FIELDS.hardware_address_length)
    }

    pub fn protocol_address_length(&self) -> Result<u8> {
        self.header.get(&ARP_FIELDS.protocol_address_length)
    }

    pub fn operation(&self) -> Result<ArpOperation> {
        self.header.get::<u16>(&ARP_FIELDS.operation).map(ArpOperation::from)
    }

    pub fn sender_hardware_address(&self) -> Result<Vec<u8>> {
        ARP_FIELDS.sender_hardware().get(&self.header)
    }

    pub fn target_hardware_address(&self) -> Result<Vec<u8>> {
        ARP_FIELDS.target_hardware().get(&self.header)
    }

    pub fn sender_protocol_address(&self) -> Result<Ipv4Addr> {
        self.protocol_address(&ARP_FIELDS.sender_protocol_address)
    }

    pub fn target_protocol_address(&self) -> Result<Ipv4Addr> {
        self.protocol_address(&ARP_FIELDS.target_protocol_address)
    }

    // Setters
    pub fn set_hardware_address_type(&mut self, value: u16) -> Result<()> {
        self.header.put(&ARP_FIELDS.hardware_address_type, value)
    }

    pub fn set_protocol_address_type(&mut self, value: EtherType) -> Result<()> {
        self.header.put(&ARP_FIELDS.protocol_address_type, value.raw())
    }

    pub fn set_hardware_address_length(&mut self, value: u8) -> Result<()> {
        self.header.put(&ARP_FIELDS.hardware_address_length, value)
    }

    pub fn set_protocol_address_length(&mut self, value: u8) -> Result<()> {
        self.header.put(&ARP_FIELDS.protocol_address_length, value)
    }

    pub fn set_operation(&mut self, value: ArpOperation) -> Result<()> {
        self.header.put(&ARP_FIELDS.operation, value.raw())
    }

    /// Only Ethernet sized addresses are accepted, anything else fails without touching the
    /// header.
    pub fn set_sender_hardware_address(&mut self, address: &[u8]) -> Result<()> {
        ARP_FIELDS.sender_hardware().set(&self.header, address)
    }

    pub fn set_target_hardware_address(&mut self, address: &[u8]) -> Result<()> {
        ARP_FIELDS.target_hardware().set(&self.header, address)
    }

    pub fn set_sender_protocol_address(&mut self, address: Ipv4Addr) -> Result<()> {
        self.header.put_bytes(&ARP_FIELDS.sender_protocol_address, &address.octets())
    }

    pub fn set_target_protocol_address(&mut self, address: Ipv4Addr) -> Result<()> {
        self.header.put_bytes(&ARP_FIELDS.target_protocol_address, &address.octets())
    }

    fn protocol_address(&self, field: &Field) -> Result<Ipv4Addr> {
        let bytes = self.header.get_bytes(field)?;
        match bytes.as_slice() {
            [a, b, c, d] => Ok(Ipv4Addr::new(*a, *b, *c, *d)),
            _ => Err(RangeError::OutOfBounds {
                offset: field.offset,
                length: IPV4_ADDRESS_LENGTH,
                bound: field.end(),
            }
            .into()),
        }
    }
}
