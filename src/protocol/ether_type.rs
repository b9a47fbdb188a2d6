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


use crate::open_enum;

open_enum! {
    /// Protocol carried in the payload of a link layer frame. Also used as the protocol address
    /// space of ARP.
    pub struct EtherType(u16) {
        /// No protocol, only seen in padded or synthetic frames
        NONE = 0x0000,
        IPV4 = 0x0800,
        ARP = 0x0806,
        WAKE_ON_LAN = 0x0842,
        TRILL = 0x22F3,
        DEC_NET = 0x6003,
        REVERSE_ARP = 0x8035,
        APPLE_TALK = 0x809B,
        APPLE_TALK_ARP = 0x80F3,
        /// 802.1Q tagged frame
        VLAN = 0x8100,
        NOVELL_IPX = 0x8137,
        IPV6 = 0x86DD,
        CONTROL_FRAME = 0x8808,
        MPLS_UNICAST = 0x8847,
        MPLS_MULTICAST = 0x8848,
        PPPOE_DISCOVERY = 0x8863,
        PPPOE_SESSION = 0x8864,
        /// 802.1ad provider bridging
        QINQ = 0x88A8,
        LLDP = 0x88CC,
        LOOP = 0x9000,
    }
}
