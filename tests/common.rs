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


// Shared fixtures for the integration tests

#![allow(dead_code)]

use packet_overlay::SharedBuffer;

pub const SLL_HEADER_LENGTH: usize = 16;

// ARP reply from 00:11:22:33:44:55 (192.168.1.1) to 66:77:88:99:aa:bb (192.168.1.10),
// captured on the "any" device
pub const SLL_ARP_REPLY: [u8; 44] = [
    // linux cooked capture
    0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x00, 0x00, 0x08, 0x06,
    // arp
    0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x02, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0xc0, 0xa8,
    0x01, 0x01, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xc0, 0xa8, 0x01, 0x0a,
];

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

pub fn captured_frame() -> SharedBuffer {
    init_logger();
    SharedBuffer::from_slice(&SLL_ARP_REPLY)
}
