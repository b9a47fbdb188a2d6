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
use crate::layout::{Field, FieldLayout, LayoutBuilder};
use crate::utils::errors::Result;
use crate::utils::types::{Index, U16_SIZE};
use crate::view::HeaderView;

bitflags::bitflags! {
    /**
     * Capability information field of 802.11 beacon, probe response and association frames.
     *
     * Bits without a flag are reserved and are kept as they are on every update.
     *
     * IS_ESS and IS_IBSS describe alternative network topologies and should not both be set.
     * That is a protocol convention, nothing here enforces it.
     */
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CapabilityInformation: u16 {
        /// The frame comes from an ESS (infrastructure network)
        const IS_ESS = 1 << 0;
        /// The frame comes from an IBSS (ad hoc network)
        const IS_IBSS = 1 << 1;
        const CF_POLLABLE = 1 << 2;
        const CF_POLL_REQUEST = 1 << 3;
        const PRIVACY = 1 << 4;
        const SHORT_PREAMBLE = 1 << 5;
        const PBCC = 1 << 6;
        const CHANNEL_AGILITY = 1 << 7;
        const SHORT_TIME_SLOT = 1 << 10;
        const DSS_OFDM = 1 << 13;

        // Other bits are reserved.
        const _ = !0;
    }
}

impl CapabilityInformation {
    pub const fn new(field: u16) -> Self {
        Self::from_bits_retain(field)
    }

    pub const fn field(self) -> u16 {
        self.bits()
    }

    pub fn is_ess(self) -> bool {
        self.contains(Self::IS_ESS)
    }

    pub fn set_is_ess(&mut self, value: bool) {
        self.set(Self::IS_ESS, value)
    }

    pub fn is_ibss(self) -> bool {
        self.contains(Self::IS_IBSS)
    }

    pub fn set_is_ibss(&mut self, value: bool) {
        self.set(Self::IS_IBSS, value)
    }

    pub fn cf_pollable(self) -> bool {
        self.contains(Self::CF_POLLABLE)
    }

    pub fn set_cf_pollable(&mut self, value: bool) {
        self.set(Self::CF_POLLABLE, value)
    }

    pub fn cf_poll_request(self) -> bool {
        self.contains(Self::CF_POLL_REQUEST)
    }

    pub fn set_cf_poll_request(&mut self, value: bool) {
        self.set(Self::CF_POLL_REQUEST, value)
    }

    pub fn privacy(self) -> bool {
        self.contains(Self::PRIVACY)
    }

    pub fn set_privacy(&mut self, value: bool) {
        self.set(Self::PRIVACY, value)
    }

    pub fn short_preamble(self) -> bool {
        self.contains(Self::SHORT_PREAMBLE)
    }

    pub fn set_short_preamble(&mut self, value: bool) {
        self.set(Self::SHORT_PREAMBLE, value)
    }

    pub fn pbcc(self) -> bool {
        self.contains(Self::PBCC)
    }

    pub fn set_pbcc(&mut self, value: bool) {
        self.set(Self::PBCC, value)
    }

    pub fn channel_agility(self) -> bool {
        self.contains(Self::CHANNEL_AGILITY)
    }

    pub fn set_channel_agility(&mut self, value: bool) {
        self.set(Self::CHANNEL_AGILITY, value)
    }

    pub fn short_time_slot(self) -> bool {
        self.contains(Self::SHORT_TIME_SLOT)
    }

    pub fn set_short_time_slot(&mut self, value: bool) {
        self.set(Self::SHORT_TIME_SLOT, value)
    }

    pub fn dss_ofdm(self) -> bool {
        self.contains(Self::DSS_OFDM)
    }

    pub fn set_dss_ofdm(&mut self, value: bool) {
        self.set(Self::DSS_OFDM, value)
    }
}

impl From<u16> for CapabilityInformation {
    fn from(field: u16) -> Self {
        Self::from_bits_retain(field)
    }
}

impl From<CapabilityInformation> for u16 {
    fn from(value: CapabilityInformation) -> Self {
        value.bits()
    }
}

pub struct CapabilityInformationFields {
    pub capability_information: Field,
    pub layout: FieldLayout,
}

impl CapabilityInformationFields {
    fn build() -> Self {
        let mut layout = LayoutBuilder::new("capability information");
        let capability_information = layout.append("capability_information", U16_SIZE);

        Self {
            capability_information,
            layout: layout.finish_static(),
        }
    }
}

lazy_static! {
    pub static ref CAPABILITY_INFORMATION_FIELDS: CapabilityInformationFields =
        CapabilityInformationFields::build();
}

/// Overlay of the capability information field inside a management frame body. 802.11 encodes
/// the field little-endian.
#[derive(Debug)]
pub struct CapabilityInformationField {
    header: HeaderView,
}

impl CapabilityInformationField {
    pub fn from_view(header: HeaderView) -> Result<Self> {
        header.check_field(&CAPABILITY_INFORMATION_FIELDS.capability_information)?;
        Ok(Self { header })
    }

    pub fn parse(buffer: SharedBuffer, offset: Index) -> Result<Self> {
        Self::from_view(HeaderView::new(buffer, offset, CAPABILITY_INFORMATION_FIELDS.layout.length())?)
    }

    #[inline]
    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    pub fn get(&self) -> Result<CapabilityInformation> {
        let field = self.header.get_uint_le(&CAPABILITY_INFORMATION_FIELDS.capability_information)?;
        Ok(CapabilityInformation::from_bits_retain(field as u16))
    }

    pub fn set(&mut self, value: CapabilityInformation) -> Result<()> {
        self.header.put_uint_le(&CAPABILITY_INFORMATION_FIELDS.capability_information, u64::from(value.bits()))
    }

    /// Read-modify-write of the whole field. Not atomic: callers sharing the buffer must not
    /// interleave their own updates of the same field.
    pub fn update<F>(&mut self, change: F) -> Result<CapabilityInformation>
    where
        F: FnOnce(&mut CapabilityInformation),
    {
        let mut value = self.get()?;
        change(&mut value);
        self.set(value)?;
        Ok(value)
    }
}
