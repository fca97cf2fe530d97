//! Multi-step order flow - customize, contact details, payment, confirmation.
//!
//! The flow is a tagged union of stages rather than one record with a step
//! counter: each stage carries only the data that is valid at that point, and
//! advancing moves validated data forward into the next stage. Blocked
//! advancement is silent (the affordance is simply disabled); nothing here
//! ever talks to a server - confirming an order only generates a reference
//! and freezes the draft for the WhatsApp hand-off.

use crate::core::{catalog::CatalogItem, design::CustomDesign, money::Money};
use chrono::NaiveDate;
use rand::Rng;
use std::fmt;

/// Fixed label shown instead of a price for custom-design orders.
pub const QUOTE_PENDING_LABEL: &str = "Fiyat Teklifi Alınacak";

/// How many days out the earliest suggested delivery date lies.
const MIN_DELIVERY_LEAD_DAYS: i64 = 3;

/// A cake size tier with its price modifier, loaded from configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeTier {
    /// Stable tier identifier (1-based, in menu order)
    pub id: u8,
    /// Display label (e.g. "8-10 Kişilik (18cm)")
    pub label: String,
    /// Amount added on top of the base price
    pub price_mod: Money,
}

/// Payment method chosen in the payment stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Online card payment
    #[default]
    CreditCard,
    /// Bank transfer, discounted
    BankTransfer,
    /// Cash or card at the door
    PayAtDoor,
}

impl PaymentMethod {
    /// Turkish display label used in summaries and the hand-off message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Kredi Kartı",
            Self::BankTransfer => "Havale/EFT",
            Self::PayAtDoor => "Kapıda Ödeme",
        }
    }
}

/// What is being ordered: a catalog product or an AI-generated custom design.
/// Exactly one is attached per flow.
#[derive(Clone, Debug)]
pub enum OrderSubject {
    /// A product from the catalog
    Item(CatalogItem),
    /// A generated design; always quote-on-request
    Custom(CustomDesign),
}

impl OrderSubject {
    /// Display name for summaries.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Item(item) => &item.name,
            Self::Custom(_) => "Kişiye Özel Tasarım",
        }
    }

    /// Base price before size modifiers. Custom designs and unpriced catalog
    /// items contribute zero; their real price is quoted over WhatsApp.
    #[must_use]
    pub fn base_price(&self) -> Money {
        match self {
            Self::Item(item) => item.price.unwrap_or_else(Money::zero),
            Self::Custom(_) => Money::zero(),
        }
    }

    /// Whether this order is for a custom design.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// Size, flavor, and optional cake note. Every field has a default, so the
/// customize stage always validates.
#[derive(Clone, Debug, PartialEq)]
pub struct Customization {
    /// Chosen size tier
    pub size: SizeTier,
    /// Chosen flavor
    pub flavor: String,
    /// Optional writing on the cake / note to the baker
    pub note: Option<String>,
}

/// In-progress contact details; unvalidated until the stage advances.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailsForm {
    /// Customer name
    pub name: String,
    /// Phone number
    pub phone: String,
    /// Requested delivery date
    pub delivery_date: Option<NaiveDate>,
    /// Delivery address
    pub address: String,
}

impl DetailsForm {
    /// The details-stage validation predicate: name longer than 2 characters,
    /// phone longer than 9, a date set, address longer than 10. Length checks
    /// only; no format parsing.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.name.trim().chars().count() > 2
            && self.phone.trim().chars().count() > 9
            && self.delivery_date.is_some()
            && self.address.trim().chars().count() > 10
    }
}

/// Validated contact details carried from the details stage onward.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactDetails {
    /// Customer name
    pub name: String,
    /// Phone number
    pub phone: String,
    /// Requested delivery date
    pub delivery_date: NaiveDate,
    /// Delivery address
    pub address: String,
}

impl From<ContactDetails> for DetailsForm {
    fn from(contact: ContactDetails) -> Self {
        Self {
            name: contact.name,
            phone: contact.phone,
            delivery_date: Some(contact.delivery_date),
            address: contact.address,
        }
    }
}

/// A generated order reference, e.g. `#IPEK-4821`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderReference(String);

impl OrderReference {
    /// Generates a fresh reference: the configured prefix plus 4 random digits.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        let digits = rand::rng().random_range(1000..10000);
        Self(format!("#{prefix}-{digits}"))
    }

    /// The reference as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confirmed, frozen order.
#[derive(Clone, Debug)]
pub struct ConfirmedOrder {
    /// The generated reference shown to the shopper
    pub reference: OrderReference,
    /// Size, flavor, note
    pub customization: Customization,
    /// Validated contact details
    pub contact: ContactDetails,
    /// Chosen payment method
    pub method: PaymentMethod,
}

/// The flow's current stage. Each variant carries exactly the data valid there.
#[derive(Clone, Debug)]
pub enum OrderStage {
    /// Step 1 - size, flavor, note (all defaulted, always valid)
    Customize {
        /// The customization being edited
        form: Customization,
    },
    /// Step 2 - contact details being collected
    Details {
        /// Validated customization from step 1
        customization: Customization,
        /// The details being edited
        form: DetailsForm,
    },
    /// Step 3 - payment method selection (defaulted, always valid)
    Payment {
        /// Validated customization from step 1
        customization: Customization,
        /// Validated contact details from step 2
        contact: ContactDetails,
        /// Currently selected payment method
        method: PaymentMethod,
    },
    /// Step 4 - terminal; the order is frozen
    Confirmed(ConfirmedOrder),
}

impl OrderStage {
    /// 1-based step number, matching the storefront's "Adım n / 3" display.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Customize { .. } => 1,
            Self::Details { .. } => 2,
            Self::Payment { .. } => 3,
            Self::Confirmed(_) => 4,
        }
    }

    /// Turkish stage label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Customize { .. } => "Özelleştir",
            Self::Details { .. } => "Bilgiler",
            Self::Payment { .. } => "Ödeme",
            Self::Confirmed(_) => "Onay",
        }
    }
}

/// One order-intake session. Discarded entirely when closed; never persisted.
#[derive(Clone, Debug)]
pub struct OrderFlow {
    subject: OrderSubject,
    reference_prefix: String,
    stage: OrderStage,
}

impl OrderFlow {
    /// Opens a new flow at the customize stage with defaulted selections.
    #[must_use]
    pub const fn open(
        subject: OrderSubject,
        default_size: SizeTier,
        default_flavor: String,
        reference_prefix: String,
    ) -> Self {
        Self {
            subject,
            reference_prefix,
            stage: OrderStage::Customize {
                form: Customization {
                    size: default_size,
                    flavor: default_flavor,
                    note: None,
                },
            },
        }
    }

    /// The subject of the order.
    #[must_use]
    pub const fn subject(&self) -> &OrderSubject {
        &self.subject
    }

    /// The current stage.
    #[must_use]
    pub const fn stage(&self) -> &OrderStage {
        &self.stage
    }

    /// The customization as currently known, whatever the stage.
    #[must_use]
    pub const fn customization(&self) -> &Customization {
        match &self.stage {
            OrderStage::Customize { form } => form,
            OrderStage::Details { customization, .. }
            | OrderStage::Payment { customization, .. } => customization,
            OrderStage::Confirmed(order) => &order.customization,
        }
    }

    /// The frozen order, once confirmed.
    #[must_use]
    pub const fn confirmed(&self) -> Option<&ConfirmedOrder> {
        match &self.stage {
            OrderStage::Confirmed(order) => Some(order),
            _ => None,
        }
    }

    // ---- stage-scoped mutators; each returns whether it applied ----

    /// Sets the size tier. Valid in the customize stage only.
    pub fn set_size(&mut self, size: SizeTier) -> bool {
        if let OrderStage::Customize { form } = &mut self.stage {
            form.size = size;
            return true;
        }
        false
    }

    /// Sets the flavor. Valid in the customize stage only.
    pub fn set_flavor(&mut self, flavor: String) -> bool {
        if let OrderStage::Customize { form } = &mut self.stage {
            form.flavor = flavor;
            return true;
        }
        false
    }

    /// Sets (or clears) the cake note. Valid in the customize stage only.
    pub fn set_note(&mut self, note: Option<String>) -> bool {
        if let OrderStage::Customize { form } = &mut self.stage {
            form.note = note.filter(|n| !n.trim().is_empty());
            return true;
        }
        false
    }

    /// Sets the customer name. Valid in the details stage only.
    pub fn set_name(&mut self, name: String) -> bool {
        if let OrderStage::Details { form, .. } = &mut self.stage {
            form.name = name;
            return true;
        }
        false
    }

    /// Sets the phone number. Valid in the details stage only.
    pub fn set_phone(&mut self, phone: String) -> bool {
        if let OrderStage::Details { form, .. } = &mut self.stage {
            form.phone = phone;
            return true;
        }
        false
    }

    /// Sets the delivery date. Valid in the details stage only.
    pub fn set_delivery_date(&mut self, date: NaiveDate) -> bool {
        if let OrderStage::Details { form, .. } = &mut self.stage {
            form.delivery_date = Some(date);
            return true;
        }
        false
    }

    /// Sets the delivery address. Valid in the details stage only.
    pub fn set_address(&mut self, address: String) -> bool {
        if let OrderStage::Details { form, .. } = &mut self.stage {
            form.address = address;
            return true;
        }
        false
    }

    /// Sets the payment method. Valid in the payment stage only.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> bool {
        if let OrderStage::Payment { method: current, .. } = &mut self.stage {
            *current = method;
            return true;
        }
        false
    }

    // ---- transitions ----

    /// Whether the current stage's validation predicate passes.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match &self.stage {
            // Size, flavor, and payment method always have defaults.
            OrderStage::Customize { .. } | OrderStage::Payment { .. } => true,
            OrderStage::Details { form, .. } => form.is_valid(),
            OrderStage::Confirmed(_) => false,
        }
    }

    /// Moves to the next stage if the current one validates; returns whether
    /// the flow moved. Advancing from the payment stage confirms the order:
    /// a reference is generated exactly once and the draft freezes.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }

        self.stage = match self.stage.clone() {
            OrderStage::Customize { form } => OrderStage::Details {
                customization: form,
                form: DetailsForm::default(),
            },
            OrderStage::Details { customization, form } => {
                // can_advance() guaranteed the date is set.
                let Some(delivery_date) = form.delivery_date else {
                    return false;
                };
                OrderStage::Payment {
                    customization,
                    contact: ContactDetails {
                        name: form.name.trim().to_string(),
                        phone: form.phone.trim().to_string(),
                        delivery_date,
                        address: form.address.trim().to_string(),
                    },
                    method: PaymentMethod::default(),
                }
            }
            OrderStage::Payment {
                customization,
                contact,
                method,
            } => OrderStage::Confirmed(ConfirmedOrder {
                reference: OrderReference::generate(&self.reference_prefix),
                customization,
                contact,
                method,
            }),
            OrderStage::Confirmed(order) => OrderStage::Confirmed(order),
        };
        true
    }

    /// Moves back one stage, re-opening the previous form populated from the
    /// data already validated. Not allowed from the first stage or after
    /// confirmation; returns whether the flow moved.
    pub fn back(&mut self) -> bool {
        match self.stage.clone() {
            OrderStage::Details { customization, .. } => {
                self.stage = OrderStage::Customize {
                    form: customization,
                };
                true
            }
            OrderStage::Payment {
                customization,
                contact,
                ..
            } => {
                self.stage = OrderStage::Details {
                    customization,
                    form: contact.into(),
                };
                true
            }
            OrderStage::Customize { .. } | OrderStage::Confirmed(_) => false,
        }
    }

    // ---- pricing ----

    /// Base price plus the chosen size tier's modifier.
    #[must_use]
    pub fn total_price(&self) -> Money {
        self.subject.base_price() + self.customization().size.price_mod
    }

    /// Price text for display: the formatted total, or the fixed quote-pending
    /// label for custom-design orders regardless of any computed number.
    #[must_use]
    pub fn price_display(&self) -> String {
        if self.subject.is_custom() {
            QUOTE_PENDING_LABEL.to_string()
        } else {
            self.total_price().to_string()
        }
    }

    /// Earliest suggested delivery date: three days from `today`. Advisory
    /// only; the details validation does not enforce a range.
    #[must_use]
    pub fn earliest_delivery_date(today: NaiveDate) -> NaiveDate {
        today + chrono::Duration::days(MIN_DELIVERY_LEAD_DAYS)
    }
}
