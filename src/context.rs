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


use crate::protocol::arp::ARP_HARDWARE_TYPE_ETHERNET;
use crate::protocol::ether_type::EtherType;
use crate::protocol::linux_sll::{LinuxSllType, ARPHRD_ETHER};

/**
 * Context provides the defaults used when a header is built on a fresh buffer rather than
 * overlaid on captured bytes. Headers parsed from existing bytes never consult it.
 */
#[derive(Clone, Debug)]
pub struct Context {
    arp_hardware_address_type: u16,
    arp_protocol_address_type: EtherType,
    sll_arphrd: u16,
    sll_packet_type: LinuxSllType,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            arp_hardware_address_type: ARP_HARDWARE_TYPE_ETHERNET,
            arp_protocol_address_type: EtherType::IPV4,
            sll_arphrd: ARPHRD_ETHER,
            sll_packet_type: LinuxSllType::SENT_BY_US,
        }
    }

    pub fn arp_hardware_address_type(&self) -> u16 {
        self.arp_hardware_address_type
    }

    /**
     * Set the hardware address space written in to new ARP headers.
     *
     * @param value ARP hardware type, 1 for Ethernet
     * @return reference to this Context instance
     */
    pub fn set_arp_hardware_address_type(&mut self, value: u16) -> &Self {
        self.arp_hardware_address_type = value;
        self
    }

    pub fn arp_protocol_address_type(&self) -> EtherType {
        self.arp_protocol_address_type
    }

    pub fn set_arp_protocol_address_type(&mut self, value: EtherType) -> &Self {
        self.arp_protocol_address_type = value;
        self
    }

    pub fn sll_arphrd(&self) -> u16 {
        self.sll_arphrd
    }

    pub fn set_sll_arphrd(&mut self, value: u16) -> &Self {
        self.sll_arphrd = value;
        self
    }

    pub fn sll_packet_type(&self) -> LinuxSllType {
        self.sll_packet_type
    }

    pub fn set_sll_packet_type(&mut self, value: LinuxSllType) -> &Self {
        self.sll_packet_type = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_ethernet_and_ipv4() {
        let context = Context::default();

        assert_eq!(context.arp_hardware_address_type(), 1);
        assert_eq!(context.arp_protocol_address_type(), EtherType::IPV4);
        assert_eq!(context.sll_arphrd(), 1);
        assert_eq!(context.sll_packet_type(), LinuxSllType::SENT_BY_US);
    }

    #[test]
    fn setters_override_defaults() {
        let mut context = Context::new();
        context.set_arp_hardware_address_type(6);
        context.set_sll_packet_type(LinuxSllType::BROADCAST);

        assert_eq!(context.arp_hardware_address_type(), 6);
        assert_eq!(context.sll_packet_type(), LinuxSllType::BROADCAST);
    }
}
